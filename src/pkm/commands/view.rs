use crate::commands::{CmdMessage, CmdResult, Context};
use crate::error::Result;
use crate::model::Task;
use crate::store::DocumentStore;

pub fn inbox<S: DocumentStore>(ctx: &Context<S>) -> Result<CmdResult> {
    let notes = ctx.notes().get_inbox_notes()?;
    let tasks = ctx.tasks().get_inbox_tasks()?;

    let message = if notes.is_empty() && tasks.is_empty() {
        CmdMessage::info("Inbox is empty")
    } else {
        CmdMessage::info(format!(
            "Total inbox items: {} ({} notes, {} tasks)",
            notes.len() + tasks.len(),
            notes.len(),
            tasks.len()
        ))
    };
    Ok(CmdResult::default()
        .with_notes(notes)
        .with_tasks(tasks)
        .with_message(message))
}

/// Open tasks due today, most urgent first.
pub fn today<S: DocumentStore>(ctx: &Context<S>) -> Result<CmdResult> {
    let mut tasks = ctx.tasks().get_tasks_today()?;
    tasks.sort_by_key(|t| t.priority);

    let message = if tasks.is_empty() {
        CmdMessage::info("No tasks due today!")
    } else {
        CmdMessage::info(format!("Total: {} tasks due today", tasks.len()))
    };
    Ok(CmdResult::default().with_tasks(tasks).with_message(message))
}

/// Open tasks due within `days`, soonest first.
pub fn week<S: DocumentStore>(ctx: &Context<S>, days: u32) -> Result<CmdResult> {
    let mut tasks = ctx.tasks().get_tasks_within(days)?;
    sort_by_due(&mut tasks);

    let message = if tasks.is_empty() {
        CmdMessage::info("No tasks due this week!")
    } else {
        CmdMessage::info(format!("Total: {} tasks due within {} days", tasks.len(), days))
    };
    Ok(CmdResult::default().with_tasks(tasks).with_message(message))
}

/// Open tasks past due, most overdue first.
pub fn overdue<S: DocumentStore>(ctx: &Context<S>) -> Result<CmdResult> {
    let mut tasks = ctx.tasks().get_tasks_overdue()?;
    sort_by_due(&mut tasks);

    let message = if tasks.is_empty() {
        CmdMessage::success("No overdue tasks - great job!")
    } else {
        CmdMessage::warning(format!("Total: {} overdue tasks", tasks.len()))
    };
    Ok(CmdResult::default().with_tasks(tasks).with_message(message))
}

pub fn course<S: DocumentStore>(ctx: &Context<S>, name: &str) -> Result<CmdResult> {
    let notes = ctx.notes().get_notes_by_course(name)?;
    let tasks = ctx.tasks().get_tasks_by_course(name)?;

    let message = if notes.is_empty() && tasks.is_empty() {
        CmdMessage::info(format!("Nothing filed under '{}'", name))
    } else {
        CmdMessage::info(format!("{}: {} notes, {} tasks", name, notes.len(), tasks.len()))
    };
    Ok(CmdResult::default()
        .with_notes(notes)
        .with_tasks(tasks)
        .with_message(message))
}

pub fn topic<S: DocumentStore>(ctx: &Context<S>, name: &str) -> Result<CmdResult> {
    let notes = ctx.notes().get_notes_by_topic(name)?;
    let message = CmdMessage::info(format!("{} notes tagged '{}'", notes.len(), name));
    Ok(CmdResult::default().with_notes(notes).with_message(message))
}

pub fn note<S: DocumentStore>(ctx: &Context<S>, id: &str) -> Result<CmdResult> {
    Ok(match ctx.notes().get_note(id)? {
        Some(note) => CmdResult::default().with_notes(vec![note]),
        None => CmdResult::default()
            .with_message(CmdMessage::error(format!("Note not found: {}", id))),
    })
}

pub fn task<S: DocumentStore>(ctx: &Context<S>, id: &str) -> Result<CmdResult> {
    Ok(match ctx.tasks().get_task(id)? {
        Some(task) => CmdResult::default().with_tasks(vec![task]),
        None => CmdResult::default()
            .with_message(CmdMessage::error(format!("Task not found: {}", id))),
    })
}

fn sort_by_due(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.due_date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::context;
    use crate::commands::MessageLevel;
    use crate::model::Priority;
    use chrono::Duration;

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn empty_inbox_says_so() {
        let ctx = context();
        let result = inbox(&ctx).unwrap();
        assert_eq!(result.messages[0].content, "Inbox is empty");
    }

    #[test]
    fn inbox_counts_notes_and_tasks() {
        let ctx = context();
        ctx.notes().create_note("Inbox note", None, &[]).unwrap();
        ctx.notes()
            .create_note("Course note", Some("Biology"), &[])
            .unwrap();
        ctx.tasks()
            .create_task("Inbox task", None, Priority::Medium, None)
            .unwrap();

        let result = inbox(&ctx).unwrap();
        assert_eq!(result.notes.len(), 1);
        assert_eq!(result.notes[0].content, "Inbox note");
        assert_eq!(result.tasks.len(), 1);
        assert_eq!(
            result.messages[0].content,
            "Total inbox items: 2 (1 notes, 1 tasks)"
        );
    }

    #[test]
    fn today_is_sorted_by_priority() {
        let ctx = context();
        let due = ctx.now().date().and_hms_opt(12, 0, 0);
        for (title, priority) in [
            ("low", Priority::Low),
            ("high", Priority::High),
            ("medium", Priority::Medium),
            ("high 2", Priority::High),
        ] {
            ctx.tasks().create_task(title, due, priority, None).unwrap();
        }

        let result = today(&ctx).unwrap();
        assert_eq!(titles(&result.tasks), vec!["high", "high 2", "medium", "low"]);
    }

    #[test]
    fn week_and_overdue_are_sorted_by_due_date() {
        let ctx = context();
        let now = ctx.now();
        for offset in [5_i64, -1, 2, -4, 0] {
            ctx.tasks()
                .create_task(
                    &format!("{}", offset),
                    Some(now + Duration::days(offset)),
                    Priority::Medium,
                    None,
                )
                .unwrap();
        }

        let week_result = week(&ctx, 7).unwrap();
        assert_eq!(titles(&week_result.tasks), vec!["0", "2", "5"]);

        let overdue_result = overdue(&ctx).unwrap();
        assert_eq!(titles(&overdue_result.tasks), vec!["-4", "-1"]);
        assert_eq!(overdue_result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn course_view_collects_both_kinds() {
        let ctx = context();
        ctx.notes()
            .create_note("n", Some("Math 201"), &[])
            .unwrap();
        ctx.tasks()
            .create_task("t", None, Priority::Low, Some("Math 201"))
            .unwrap();
        ctx.tasks().create_task("other", None, Priority::Low, None).unwrap();

        let result = course(&ctx, "Math 201").unwrap();
        assert_eq!(result.notes.len(), 1);
        assert_eq!(result.tasks.len(), 1);
    }

    #[test]
    fn missing_items_are_failures_not_errors() {
        let ctx = context();
        assert!(note(&ctx, "n_404").unwrap().is_failure());
        assert!(task(&ctx, "t_404").unwrap().is_failure());
    }
}
