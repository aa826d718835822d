use crate::error::PkmError;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Where an item lives: the inbox, or filed under a course.
///
/// The inbox is defined as "not assigned to a course", so the two cases are a
/// sum type rather than a nullable string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    #[default]
    Inbox,
    Course(String),
}

impl Placement {
    /// Builds a placement from user input. Blank names mean "inbox".
    pub fn from_input(course: Option<&str>) -> Self {
        match course.map(str::trim) {
            Some(name) if !name.is_empty() => Placement::Course(name.to_string()),
            _ => Placement::Inbox,
        }
    }

    pub fn is_inbox(&self) -> bool {
        matches!(self, Placement::Inbox)
    }

    pub fn course(&self) -> Option<&str> {
        match self {
            Placement::Inbox => None,
            Placement::Course(name) => Some(name),
        }
    }

    pub fn is_course(&self, name: &str) -> bool {
        self.course() == Some(name)
    }
}

impl From<Option<String>> for Placement {
    fn from(course: Option<String>) -> Self {
        match course {
            Some(name) => Placement::Course(name),
            None => Placement::Inbox,
        }
    }
}

impl From<&Placement> for Option<String> {
    fn from(placement: &Placement) -> Self {
        placement.course().map(str::to_string)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Inbox => write!(f, "inbox"),
            Placement::Course(name) => write!(f, "course '{}'", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = PkmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(PkmError::InvalidPriority(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
    pub placement: Placement,
    pub topics: Vec<String>,
    // Back-references only; the task owns the link.
    pub linked_from_tasks: Vec<String>,
}

impl Note {
    pub fn new(id: String, content: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            content,
            created_at: now,
            modified_at: now,
            placement: Placement::Inbox,
            topics: Vec::new(),
            linked_from_tasks: Vec::new(),
        }
    }

    pub fn in_inbox(&self) -> bool {
        self.placement.is_inbox()
    }

    /// Appends topics not already present, keeping first-seen order.
    /// Returns how many were added.
    pub fn add_topics<I, T>(&mut self, topics: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let before = self.topics.len();
        for topic in topics {
            let topic = topic.as_ref().trim();
            if topic.is_empty() || self.topics.iter().any(|t| t == topic) {
                continue;
            }
            self.topics.push(topic.to_string());
        }
        self.topics.len() - before
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    pub priority: Priority,
    pub completed: bool,
    /// Present exactly when `completed` is true.
    pub completed_at: Option<NaiveDateTime>,
    pub placement: Placement,
    pub linked_notes: Vec<String>,
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(id: String, title: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            title,
            created_at: now,
            due_date: None,
            priority: Priority::default(),
            completed: false,
            completed_at: None,
            placement: Placement::Inbox,
            linked_notes: Vec::new(),
            subtasks: Vec::new(),
        }
    }

    pub fn in_inbox(&self) -> bool {
        self.placement.is_inbox()
    }

    /// Marks the task done. Completing again refreshes `completed_at`.
    pub fn complete(&mut self, now: NaiveDateTime) {
        self.completed = true;
        self.completed_at = Some(now);
    }

    /// Appends a pending subtask numbered after the existing ones.
    pub fn push_subtask(&mut self, title: String) -> u32 {
        let id = next_subtask_id(self.subtasks.len());
        self.subtasks.push(Subtask {
            id,
            title,
            completed: false,
        });
        id
    }

    pub fn subtask_mut(&mut self, subtask_id: u32) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == subtask_id)
    }

    /// `(done, total)` over the subtasks.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }
}

/// Subtask ids count from 1 and saturate at `u32::MAX`.
fn next_subtask_id(existing: usize) -> u32 {
    u32::try_from(existing).unwrap_or(u32::MAX).saturating_add(1)
}
