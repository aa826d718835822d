use chrono::NaiveDateTime;
use colored::Colorize;
use pkm::api::{CmdMessage, MessageLevel};
use pkm::commands::subtask_summary;
use pkm::config::PkmConfig;
use pkm::dates::format_due_date;
use pkm::model::{Note, Priority, Task};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 24;
const DUE_WIDTH: usize = 22;
const DONE_MARKER: &str = "✓";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_notes(notes: &[Note], now: NaiveDateTime) {
    if notes.is_empty() {
        return;
    }

    println!("{}", "Notes".bold());
    for note in notes {
        let id = format!("{:<width$}", note.id, width = ID_WIDTH);
        let preview: String = note
            .content
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let preview = if note.topics.is_empty() {
            preview
        } else {
            format!("{} #{}", preview, note.topics.join(" #"))
        };

        let available = LINE_WIDTH.saturating_sub(2 + ID_WIDTH + TIME_WIDTH);
        let preview = truncate_to_width(&preview, available);
        let padding = available.saturating_sub(preview.width());

        println!(
            "  {}{}{}{}",
            id.yellow(),
            preview,
            " ".repeat(padding),
            format_time_ago(note.created_at, now).dimmed()
        );
    }
}

pub(super) fn print_tasks(tasks: &[Task], now: NaiveDateTime) {
    if tasks.is_empty() {
        return;
    }

    println!("{}", "Tasks".bold());
    for task in tasks {
        let marker = if task.completed { DONE_MARKER } else { " " };
        let id = format!("{:<width$}", task.id, width = ID_WIDTH);

        let mut title = task.title.clone();
        if let Some(summary) = subtask_summary(task) {
            title = format!("{} [{}]", title, summary);
        }

        let due = task
            .due_date
            .map(|d| format_due_date(d, now))
            .unwrap_or_default();
        let due = format!("{:>width$}", due, width = DUE_WIDTH);
        let due = match task.due_date {
            Some(d) if d < now && !task.completed => due.red(),
            _ => due.dimmed(),
        };

        let fixed = 2 + 2 + 5 + ID_WIDTH + DUE_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title = truncate_to_width(&title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "  {} {} {}{}{}{}",
            marker.green(),
            priority_label(task.priority),
            id.yellow(),
            title,
            " ".repeat(padding),
            due
        );
    }
}

pub(super) fn print_full_note(note: &Note) {
    println!("{} {}", note.id.yellow(), note.placement.to_string().bold());
    println!("--------------------------------");
    println!("{}", note.content);
    println!("--------------------------------");
    if !note.topics.is_empty() {
        println!("Topics:   {}", note.topics.join(", "));
    }
    if !note.linked_from_tasks.is_empty() {
        println!("Tasks:    {}", note.linked_from_tasks.join(", "));
    }
    println!("Created:  {}", note.created_at.format("%Y-%m-%d %H:%M"));
    println!("Modified: {}", note.modified_at.format("%Y-%m-%d %H:%M"));
}

pub(super) fn print_full_task(task: &Task, now: NaiveDateTime) {
    let title = if task.completed {
        format!("{} {}", DONE_MARKER, task.title).green().bold()
    } else {
        task.title.bold()
    };
    println!("{} {}", task.id.yellow(), title);
    println!("--------------------------------");
    println!("Priority: {}", priority_label(task.priority));
    println!("Where:    {}", task.placement);
    if let Some(due) = task.due_date {
        println!("Due:      {}", format_due_date(due, now));
    }
    if let Some(at) = task.completed_at {
        println!("Done:     {}", at.format("%Y-%m-%d %H:%M"));
    }
    if !task.linked_notes.is_empty() {
        println!("Notes:    {}", task.linked_notes.join(", "));
    }

    if let Some(summary) = subtask_summary(task) {
        println!();
        println!("Subtasks ({}):", summary);
        for subtask in &task.subtasks {
            let check = if subtask.completed { DONE_MARKER } else { " " };
            println!("  [{}] {}. {}", check.green(), subtask.id, subtask.title);
        }
    }
}

pub(super) fn print_config(config: &PkmConfig) {
    for key in PkmConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn priority_label(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::High => "HIGH".red().bold(),
        Priority::Medium => "MED ".yellow(),
        Priority::Low => "LOW ".dimmed(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 26)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 20), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // wide chars count double
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let label = format_time_ago(at(9, 0), at(10, 0));
        assert_eq!(label.len(), TIME_WIDTH);
        assert!(label.trim_start().starts_with("1 hour"));
    }

    #[test]
    fn future_timestamps_do_not_panic() {
        let label = format_time_ago(at(11, 0), at(10, 0));
        assert_eq!(label.len(), TIME_WIDTH);
    }
}
