//! # Document Schema
//!
//! The on-disk contract. Everything lives in a single JSON document:
//!
//! ```text
//! {
//!   "notes": [ {id, content, created_at, modified_at, course, topics[], linked_from_tasks[]} ],
//!   "tasks": [ {id, title, created_at, due_date, priority, completed, completed_at,
//!               course, linked_notes[], subtasks: [{id, title, completed}]} ]
//! }
//! ```
//!
//! Records mirror that layout field for field: timestamps are ISO-8601 strings
//! (`2025-11-23T10:30:45` with optional fractional seconds), `priority` is the
//! lowercase name, and absent optionals are written as explicit `null`s.
//!
//! Conversion to the domain types goes through `From<&Note> for NoteRecord`
//! (serialize, infallible) and `TryFrom<NoteRecord> for Note` (deserialize,
//! validates priority and timestamps). Same for tasks and subtasks.

use crate::error::{PkmError, Result};
use crate::model::{Note, Placement, Priority, Subtask, Task};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub notes: Vec<NoteRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl Document {
    pub fn note_index(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    pub fn task_index(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.notes.iter().any(|n| n.id == id) || self.tasks.iter().any(|t| t.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub content: String,
    pub created_at: String,
    pub modified_at: String,
    pub course: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub linked_from_tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub due_date: Option<String>,
    pub priority: String,
    pub completed: bool,
    pub completed_at: Option<String>,
    pub course: Option<String>,
    #[serde(default)]
    pub linked_notes: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<SubtaskRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtaskRecord {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| {
        PkmError::InvalidTimestamp {
            field,
            value: value.to_string(),
        }
    })
}

fn parse_optional(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            content: note.content.clone(),
            created_at: format_timestamp(&note.created_at),
            modified_at: format_timestamp(&note.modified_at),
            course: (&note.placement).into(),
            topics: note.topics.clone(),
            linked_from_tasks: note.linked_from_tasks.clone(),
        }
    }
}

impl TryFrom<NoteRecord> for Note {
    type Error = PkmError;

    fn try_from(record: NoteRecord) -> Result<Self> {
        Ok(Self {
            created_at: parse_timestamp("created_at", &record.created_at)?,
            modified_at: parse_timestamp("modified_at", &record.modified_at)?,
            id: record.id,
            content: record.content,
            placement: Placement::from(record.course),
            topics: record.topics,
            linked_from_tasks: record.linked_from_tasks,
        })
    }
}

impl From<&Subtask> for SubtaskRecord {
    fn from(subtask: &Subtask) -> Self {
        Self {
            id: subtask.id,
            title: subtask.title.clone(),
            completed: subtask.completed,
        }
    }
}

impl From<SubtaskRecord> for Subtask {
    fn from(record: SubtaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            completed: record.completed,
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            created_at: format_timestamp(&task.created_at),
            due_date: task.due_date.as_ref().map(format_timestamp),
            priority: task.priority.as_str().to_string(),
            completed: task.completed,
            completed_at: task.completed_at.as_ref().map(format_timestamp),
            course: (&task.placement).into(),
            linked_notes: task.linked_notes.clone(),
            subtasks: task.subtasks.iter().map(SubtaskRecord::from).collect(),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = PkmError;

    fn try_from(record: TaskRecord) -> Result<Self> {
        let completed_at = if record.completed {
            parse_optional("completed_at", record.completed_at.as_deref())?
        } else {
            // Only completed tasks carry a completion time.
            None
        };

        Ok(Self {
            created_at: parse_timestamp("created_at", &record.created_at)?,
            due_date: parse_optional("due_date", record.due_date.as_deref())?,
            priority: record.priority.parse()?,
            completed: record.completed,
            completed_at,
            id: record.id,
            title: record.title,
            placement: Placement::from(record.course),
            linked_notes: record.linked_notes,
            subtasks: record.subtasks.into_iter().map(Subtask::from).collect(),
        })
    }
}
