use crate::commands::{CmdMessage, CmdResult, Context};
use crate::dates::{format_due_date, parse_due_date};
use crate::error::Result;
use crate::model::Priority;
use crate::store::DocumentStore;

pub fn note<S: DocumentStore>(
    ctx: &Context<S>,
    content: &str,
    course: Option<&str>,
    topics: &[&str],
) -> Result<CmdResult> {
    let note = ctx.notes().create_note(content, course, topics)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note created: {} in {}",
        note.id, note.placement
    )));
    if !note.topics.is_empty() {
        result.add_message(CmdMessage::success(format!("Tagged with: {}", note.topics.join(", "))));
    }
    Ok(result.with_notes(vec![note]))
}

pub fn task<S: DocumentStore>(
    ctx: &Context<S>,
    title: &str,
    due: Option<&str>,
    priority: Priority,
    course: Option<&str>,
) -> Result<CmdResult> {
    let now = ctx.now();
    let due_date = due.map(|input| parse_due_date(input, now)).transpose()?;
    let task = ctx.tasks().create_task(title, due_date, priority, course)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Task created: {} in {}",
        task.id, task.placement
    )));
    if task.priority != Priority::Medium {
        result.add_message(CmdMessage::success(format!("Priority: {}", task.priority)));
    }
    if let Some(due) = task.due_date {
        result.add_message(CmdMessage::info(format!("Due: {}", format_due_date(due, now))));
    }
    Ok(result.with_tasks(vec![task]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::context;
    use crate::error::PkmError;

    #[test]
    fn note_reports_location_and_topics() {
        let ctx = context();
        let result = note(&ctx, "DNA info", Some("BIO101"), &["Biology", "Genetics"]).unwrap();

        assert_eq!(result.notes.len(), 1);
        assert_eq!(result.messages[0].content, "Note created: n_1 in course 'BIO101'");
        assert_eq!(result.messages[1].content, "Tagged with: Biology, Genetics");
    }

    #[test]
    fn inbox_note_says_inbox() {
        let ctx = context();
        let result = note(&ctx, "Photosynthesis", None, &[]).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.ends_with("in inbox"));
    }

    #[test]
    fn task_parses_due_date() {
        let ctx = context();
        let result = task(&ctx, "Study for exam", Some("tomorrow"), Priority::High, None).unwrap();

        let created = &result.tasks[0];
        assert_eq!(created.due_date.unwrap().to_string(), "2025-11-27 23:59:00");
        let contents: Vec<_> = result.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec![
                "Task created: t_1 in inbox",
                "Priority: high",
                "Due: Tomorrow 11:59 PM"
            ]
        );
    }

    #[test]
    fn bad_due_date_creates_nothing() {
        let ctx = context();
        let err = task(&ctx, "x", Some("someday"), Priority::Medium, None).unwrap_err();
        assert!(matches!(err, PkmError::Validation(_)));
        assert_eq!(ctx.store.save_count(), 0);
    }
}
