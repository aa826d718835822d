use crate::commands::{subtask_summary, CmdMessage, CmdResult, Context};
use crate::dates::{format_due_date, parse_due_date};
use crate::error::Result;
use crate::model::Task;
use crate::store::DocumentStore;

fn not_found(id: &str) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::error(format!("Task not found: {}", id)))
}

fn progress(task: &Task) -> CmdMessage {
    let summary = subtask_summary(task).unwrap_or_else(|| "0/0".to_string());
    CmdMessage::info(format!("Progress: {} completed", summary))
}

pub fn complete<S: DocumentStore>(ctx: &Context<S>, id: &str) -> Result<CmdResult> {
    let Some(task) = ctx.tasks().complete_task(id)? else {
        return Ok(not_found(id));
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("✓ Task completed: {}", task.title)));
    if let Some(at) = task.completed_at {
        result.add_message(CmdMessage::info(format!(
            "Completed at: {}",
            at.format("%Y-%m-%d %H:%M")
        )));
    }
    Ok(result.with_tasks(vec![task]))
}

pub fn add_subtask<S: DocumentStore>(ctx: &Context<S>, id: &str, title: &str) -> Result<CmdResult> {
    let Some(task) = ctx.tasks().add_subtask(id, title)? else {
        return Ok(not_found(id));
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Subtask added to '{}'", task.title)));
    result.add_message(CmdMessage::info(format!("Total subtasks: {}", task.subtasks.len())));
    result.add_message(progress(&task));
    Ok(result.with_tasks(vec![task]))
}

pub fn check_subtask<S: DocumentStore>(
    ctx: &Context<S>,
    id: &str,
    subtask_id: u32,
) -> Result<CmdResult> {
    let Some(task) = ctx.tasks().complete_subtask(id, subtask_id)? else {
        return Ok(CmdResult::default().with_message(CmdMessage::error(format!(
            "Task or subtask not found: {} / subtask #{}",
            id, subtask_id
        ))));
    };

    let title = task
        .subtasks
        .iter()
        .find(|s| s.id == subtask_id)
        .map(|s| s.title.clone())
        .unwrap_or_default();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("✓ Subtask completed: {}", title)));
    result.add_message(progress(&task));
    Ok(result.with_tasks(vec![task]))
}

/// Sets the due date from user input; `none` clears it.
pub fn due<S: DocumentStore>(ctx: &Context<S>, id: &str, input: &str) -> Result<CmdResult> {
    let now = ctx.now();
    let due_date = if input.trim().eq_ignore_ascii_case("none") {
        None
    } else {
        Some(parse_due_date(input, now)?)
    };

    let Some(task) = ctx.tasks().set_due_date(id, due_date)? else {
        return Ok(not_found(id));
    };

    let message = match task.due_date {
        Some(due) => CmdMessage::success(format!("Due: {}", format_due_date(due, now))),
        None => CmdMessage::success(format!("Due date cleared for '{}'", task.title)),
    };
    Ok(CmdResult::default().with_tasks(vec![task]).with_message(message))
}

pub fn organize<S: DocumentStore>(ctx: &Context<S>, id: &str, course: &str) -> Result<CmdResult> {
    Ok(match ctx.tasks().organize_task(id, course)? {
        Some(task) => {
            let message =
                CmdMessage::success(format!("Task {} moved to {}", task.id, task.placement));
            CmdResult::default().with_tasks(vec![task]).with_message(message)
        }
        None => not_found(id),
    })
}

pub fn link<S: DocumentStore>(ctx: &Context<S>, task_id: &str, note_id: &str) -> Result<CmdResult> {
    Ok(match ctx.tasks().link_note(task_id, note_id)? {
        Some(task) => {
            let message = CmdMessage::success(format!(
                "Linked note {} to '{}' ({} linked)",
                note_id,
                task.title,
                task.linked_notes.len()
            ));
            CmdResult::default().with_tasks(vec![task]).with_message(message)
        }
        None => CmdResult::default().with_message(CmdMessage::error(format!(
            "Task or note not found: {} / {}",
            task_id, note_id
        ))),
    })
}
