//! # Command Layer
//!
//! One module per user-facing command group. Commands call the services,
//! shape the result for display (ordering, counts, summaries) and describe
//! what happened as [`CmdMessage`]s. They never print.
//!
//! An unknown id is not an error at this level either: the command returns a
//! [`CmdResult`] carrying an error-level message, and the UI decides what that
//! means (the CLI exits non-zero).

use crate::clock::{Clock, SystemClock};
use crate::config::PkmConfig;
use crate::ids::{IdGenerator, TimestampIdGenerator};
use crate::model::{Note, Task};
use crate::services::{NoteService, TaskService};
use crate::store::DocumentStore;
use chrono::NaiveDateTime;

pub mod add;
pub mod config;
pub mod init;
pub mod note;
pub mod task;
pub mod view;

/// The store plus the id generator and clock shared by every command.
pub struct Context<S> {
    pub store: S,
    pub ids: Box<dyn IdGenerator>,
    pub clock: Box<dyn Clock>,
}

impl<S: DocumentStore> Context<S> {
    pub fn new(store: S) -> Self {
        Self::with_parts(store, Box::new(TimestampIdGenerator), Box::new(SystemClock))
    }

    pub fn with_parts(store: S, ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        Self { store, ids, clock }
    }

    pub fn notes(&self) -> NoteService<&S, &dyn IdGenerator, &dyn Clock> {
        NoteService::with_parts(&self.store, self.ids.as_ref(), self.clock.as_ref())
    }

    pub fn tasks(&self) -> TaskService<&S, &dyn IdGenerator, &dyn Clock> {
        TaskService::with_parts(&self.store, self.ids.as_ref(), self.clock.as_ref())
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub notes: Vec<Note>,
    pub tasks: Vec<Task>,
    pub config: Option<PkmConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_config(mut self, config: PkmConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// True when the command could not do what was asked.
    pub fn is_failure(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// `"2/3 done"` style summary, or `None` without subtasks.
pub fn subtask_summary(task: &Task) -> Option<String> {
    let (done, total) = task.subtask_progress();
    (total > 0).then(|| format!("{}/{}", done, total))
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::Context;
    use crate::clock::FixedClock;
    use crate::ids::SequenceIdGenerator;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    /// In-memory context fixed at Wednesday 2025-11-26 10:00.
    pub fn context() -> Context<InMemoryStore> {
        let today = NaiveDate::from_ymd_opt(2025, 11, 26).unwrap_or_default();
        Context::with_parts(
            InMemoryStore::new(),
            Box::new(SequenceIdGenerator::new()),
            Box::new(FixedClock::at(today, 10, 0)),
        )
    }
}
