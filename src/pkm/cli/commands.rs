//! Dispatch from parsed arguments to `PkmApi`, and printing of what came back.
//!
//! Every handler returns the `CmdResult` it printed so `run` can decide the
//! exit status: a result carrying an error-level message means the command
//! could not do what was asked.

use super::print::{
    print_config, print_full_note, print_full_task, print_messages, print_notes, print_tasks,
};
use super::setup::{AddCommands, Cli, Commands, NoteCommands, TaskCommands, ViewCommands};
use clap::Parser;
use pkm::api::{CmdResult, ConfigAction, PkmApi};
use pkm::config::resolve_data_dir;
use pkm::error::Result;
use pkm::logging::init_logging;
use pkm::model::Priority;
use pkm::store::fs::JsonFileStore;

/// Parses arguments, runs one command and prints the outcome. Returns whether
/// the command succeeded.
pub fn run() -> Result<bool> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose)?;

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    log::debug!("event=cli_start module=cli data_dir={}", data_dir.display());
    let api = PkmApi::open(data_dir)?;

    let result = match cli.command {
        Commands::Add(cmd) => handle_add(&api, cmd)?,
        Commands::View(cmd) => handle_view(&api, cmd)?,
        Commands::Note(cmd) => handle_note(&api, cmd)?,
        Commands::Task(cmd) => handle_task(&api, cmd)?,
        Commands::Config { key, value } => handle_config(&api, key, value)?,
        Commands::Init => api.init()?,
    };

    print_messages(&result.messages);
    Ok(!result.is_failure())
}

fn handle_add(api: &PkmApi<JsonFileStore>, cmd: AddCommands) -> Result<CmdResult> {
    match cmd {
        AddCommands::Note {
            content,
            course,
            topics,
        } => {
            let topics: Vec<&str> = topics.iter().map(String::as_str).collect();
            api.add_note(&content, course.as_deref(), &topics)
        }
        AddCommands::Task {
            title,
            due,
            priority,
            course,
        } => {
            let priority = priority
                .map(|p| p.trim().to_lowercase().parse::<Priority>())
                .transpose()?;
            api.add_task(&title, due.as_deref(), priority, course.as_deref())
        }
    }
}

fn handle_view(api: &PkmApi<JsonFileStore>, cmd: ViewCommands) -> Result<CmdResult> {
    let now = api.now();
    let result = match cmd {
        ViewCommands::Note { id } => {
            let result = api.view_note(&id)?;
            result.notes.iter().for_each(print_full_note);
            return Ok(result);
        }
        ViewCommands::Task { id } => {
            let result = api.view_task(&id)?;
            result.tasks.iter().for_each(|t| print_full_task(t, now));
            return Ok(result);
        }
        ViewCommands::Inbox => api.view_inbox()?,
        ViewCommands::Today => api.view_today()?,
        ViewCommands::Week => api.view_week()?,
        ViewCommands::Overdue => api.view_overdue()?,
        ViewCommands::Course { name } => api.view_course(&name)?,
        ViewCommands::Topic { name } => api.view_topic(&name)?,
    };

    print_notes(&result.notes, now);
    if !result.notes.is_empty() && !result.tasks.is_empty() {
        println!();
    }
    print_tasks(&result.tasks, now);
    Ok(result)
}

fn handle_note(api: &PkmApi<JsonFileStore>, cmd: NoteCommands) -> Result<CmdResult> {
    match cmd {
        NoteCommands::Organize { id, course } => api.organize_note(&id, &course),
        NoteCommands::Tag { id, topics } => {
            let topics: Vec<&str> = topics.iter().map(String::as_str).collect();
            api.tag_note(&id, &topics)
        }
        NoteCommands::Delete { id } => api.delete_note(&id),
    }
}

fn handle_task(api: &PkmApi<JsonFileStore>, cmd: TaskCommands) -> Result<CmdResult> {
    match cmd {
        TaskCommands::Complete { id } => api.complete_task(&id),
        TaskCommands::AddSubtask { id, title } => api.add_subtask(&id, &title),
        TaskCommands::CheckSubtask { id, subtask } => api.check_subtask(&id, subtask),
        TaskCommands::Due { id, when } => api.set_due(&id, &when),
        TaskCommands::Organize { id, course } => api.organize_task(&id, &course),
        TaskCommands::Link { task_id, note_id } => api.link_note(&task_id, &note_id),
    }
}

fn handle_config(
    api: &PkmApi<JsonFileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<CmdResult> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    Ok(result)
}
