use crate::commands::{CmdMessage, CmdResult, Context};
use crate::error::Result;
use crate::store::DocumentStore;

fn not_found(id: &str) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::error(format!("Note not found: {}", id)))
}

pub fn organize<S: DocumentStore>(ctx: &Context<S>, id: &str, course: &str) -> Result<CmdResult> {
    Ok(match ctx.notes().organize_note(id, course)? {
        Some(note) => {
            let message =
                CmdMessage::success(format!("Note {} moved to {}", note.id, note.placement));
            CmdResult::default().with_notes(vec![note]).with_message(message)
        }
        None => not_found(id),
    })
}

pub fn tag<S: DocumentStore>(ctx: &Context<S>, id: &str, topics: &[&str]) -> Result<CmdResult> {
    Ok(match ctx.notes().add_topics(id, topics)? {
        Some(note) => {
            let message = CmdMessage::success(format!("Topics: {}", note.topics.join(", ")));
            CmdResult::default().with_notes(vec![note]).with_message(message)
        }
        None => not_found(id),
    })
}

pub fn delete<S: DocumentStore>(ctx: &Context<S>, id: &str) -> Result<CmdResult> {
    Ok(if ctx.notes().delete_note(id)? {
        CmdResult::default().with_message(CmdMessage::success(format!("Note deleted: {}", id)))
    } else {
        not_found(id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::context;

    #[test]
    fn organize_then_tag() {
        let ctx = context();
        let note = ctx.notes().create_note("x", None, &["A"]).unwrap();

        let result = organize(&ctx, &note.id, "Biology 101").unwrap();
        assert!(!result.is_failure());
        assert_eq!(
            result.messages[0].content,
            "Note n_1 moved to course 'Biology 101'"
        );

        let result = tag(&ctx, &note.id, &["B", "A"]).unwrap();
        assert_eq!(result.notes[0].topics, vec!["A", "B"]);
    }

    #[test]
    fn unknown_ids_fail_softly() {
        let ctx = context();
        assert!(organize(&ctx, "n_404", "x").unwrap().is_failure());
        assert!(tag(&ctx, "n_404", &["x"]).unwrap().is_failure());
        assert!(delete(&ctx, "n_404").unwrap().is_failure());
    }

    #[test]
    fn delete_removes_note() {
        let ctx = context();
        let note = ctx.notes().create_note("x", None, &[]).unwrap();
        assert!(!delete(&ctx, &note.id).unwrap().is_failure());
        assert!(ctx.notes().list_notes().unwrap().is_empty());
    }
}
