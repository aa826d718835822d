//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every pkm operation, whatever the UI.
//!
//! It:
//! - **Dispatches** to the appropriate command function
//! - **Applies configuration** (default priority, week window)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does not hold business logic (that lives in `services/`), does not print,
//! and does not decide exit codes.
//!
//! `PkmApi<S: DocumentStore>` is generic over the storage backend:
//! - Production: `PkmApi<JsonFileStore>`
//! - Testing: `PkmApi<InMemoryStore>`

use crate::commands::{self, Context};
use crate::config::PkmConfig;
use crate::error::Result;
use crate::model::Priority;
use crate::store::fs::JsonFileStore;
use crate::store::DocumentStore;
use std::path::{Path, PathBuf};

pub struct PkmApi<S: DocumentStore> {
    ctx: Context<S>,
    data_dir: PathBuf,
    config: PkmConfig,
}

impl PkmApi<JsonFileStore> {
    /// Opens the store and config under `data_dir`. Nothing is created until
    /// the first write.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = PkmConfig::load(&data_dir)?;
        let store = JsonFileStore::new(&data_dir);
        Ok(Self::new(Context::new(store), data_dir, config))
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.ctx.store)
    }
}

impl<S: DocumentStore> PkmApi<S> {
    pub fn new(ctx: Context<S>, data_dir: PathBuf, config: PkmConfig) -> Self {
        Self {
            ctx,
            data_dir,
            config,
        }
    }

    pub fn add_note(
        &self,
        content: &str,
        course: Option<&str>,
        topics: &[&str],
    ) -> Result<commands::CmdResult> {
        commands::add::note(&self.ctx, content, course, topics)
    }

    /// Creates a task; without an explicit priority the configured default applies.
    pub fn add_task(
        &self,
        title: &str,
        due: Option<&str>,
        priority: Option<Priority>,
        course: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let priority = priority.unwrap_or(self.config.default_priority);
        commands::add::task(&self.ctx, title, due, priority, course)
    }

    pub fn view_inbox(&self) -> Result<commands::CmdResult> {
        commands::view::inbox(&self.ctx)
    }

    pub fn view_today(&self) -> Result<commands::CmdResult> {
        commands::view::today(&self.ctx)
    }

    pub fn view_week(&self) -> Result<commands::CmdResult> {
        commands::view::week(&self.ctx, self.config.week_window_days)
    }

    pub fn view_overdue(&self) -> Result<commands::CmdResult> {
        commands::view::overdue(&self.ctx)
    }

    pub fn view_course(&self, name: &str) -> Result<commands::CmdResult> {
        commands::view::course(&self.ctx, name)
    }

    pub fn view_topic(&self, name: &str) -> Result<commands::CmdResult> {
        commands::view::topic(&self.ctx, name)
    }

    pub fn view_note(&self, id: &str) -> Result<commands::CmdResult> {
        commands::view::note(&self.ctx, id)
    }

    pub fn view_task(&self, id: &str) -> Result<commands::CmdResult> {
        commands::view::task(&self.ctx, id)
    }

    pub fn organize_note(&self, id: &str, course: &str) -> Result<commands::CmdResult> {
        commands::note::organize(&self.ctx, id, course)
    }

    pub fn tag_note(&self, id: &str, topics: &[&str]) -> Result<commands::CmdResult> {
        commands::note::tag(&self.ctx, id, topics)
    }

    pub fn delete_note(&self, id: &str) -> Result<commands::CmdResult> {
        commands::note::delete(&self.ctx, id)
    }

    pub fn complete_task(&self, id: &str) -> Result<commands::CmdResult> {
        commands::task::complete(&self.ctx, id)
    }

    pub fn add_subtask(&self, id: &str, title: &str) -> Result<commands::CmdResult> {
        commands::task::add_subtask(&self.ctx, id, title)
    }

    pub fn check_subtask(&self, id: &str, subtask_id: u32) -> Result<commands::CmdResult> {
        commands::task::check_subtask(&self.ctx, id, subtask_id)
    }

    pub fn set_due(&self, id: &str, due: &str) -> Result<commands::CmdResult> {
        commands::task::due(&self.ctx, id, due)
    }

    pub fn organize_task(&self, id: &str, course: &str) -> Result<commands::CmdResult> {
        commands::task::organize(&self.ctx, id, course)
    }

    pub fn link_note(&self, task_id: &str, note_id: &str) -> Result<commands::CmdResult> {
        commands::task::link(&self.ctx, task_id, note_id)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Current time according to the API's clock, for rendering relative dates.
    pub fn now(&self) -> chrono::NaiveDateTime {
        self.ctx.now()
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
