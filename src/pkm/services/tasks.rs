use super::require_text;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::ids::{generate_unique, IdGenerator, TimestampIdGenerator, TASK_PREFIX};
use crate::model::{Note, Placement, Priority, Task};
use crate::schema::{NoteRecord, TaskRecord};
use crate::store::DocumentStore;
use chrono::{Days, NaiveDate, NaiveDateTime};
use log::info;

pub const WEEK_WINDOW_DAYS: u32 = 7;

pub struct TaskService<S, G = TimestampIdGenerator, C = SystemClock> {
    store: S,
    ids: G,
    clock: C,
}

impl<S: DocumentStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self::with_parts(store, TimestampIdGenerator, SystemClock)
    }
}

impl<S: DocumentStore, G: IdGenerator, C: Clock> TaskService<S, G, C> {
    pub fn with_parts(store: S, ids: G, clock: C) -> Self {
        Self { store, ids, clock }
    }

    /// Creates an open task. Without a course it lands in the inbox.
    pub fn create_task(
        &self,
        title: &str,
        due_date: Option<NaiveDateTime>,
        priority: Priority,
        course: Option<&str>,
    ) -> Result<Task> {
        let title = require_text("task title", title)?;

        let mut doc = self.store.load()?;
        let id = generate_unique(&self.ids, TASK_PREFIX, |candidate| doc.contains_id(candidate))?;

        let mut task = Task::new(id, title, self.clock.now());
        task.due_date = due_date;
        task.priority = priority;
        task.placement = Placement::from_input(course);

        doc.tasks.push(TaskRecord::from(&task));
        self.store.save(&doc)?;

        info!(
            "event=task_create module=tasks id={} priority={} inbox={} due={}",
            task.id,
            task.priority,
            task.in_inbox(),
            task.due_date.is_some()
        );
        Ok(task)
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let doc = self.store.load()?;
        doc.tasks
            .into_iter()
            .find(|record| record.id == id)
            .map(Task::try_from)
            .transpose()
    }

    /// All tasks in store order.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let doc = self.store.load()?;
        doc.tasks.into_iter().map(Task::try_from).collect()
    }

    pub fn get_inbox_tasks(&self) -> Result<Vec<Task>> {
        self.filtered(|task| task.in_inbox())
    }

    pub fn get_tasks_by_course(&self, course: &str) -> Result<Vec<Task>> {
        self.filtered(|task| task.placement.is_course(course))
    }

    /// Open tasks due on today's date.
    pub fn get_tasks_today(&self) -> Result<Vec<Task>> {
        let today = self.clock.today();
        self.open_due(|due| due == today)
    }

    /// Open tasks due between today and a week from today, both inclusive.
    pub fn get_tasks_this_week(&self) -> Result<Vec<Task>> {
        self.get_tasks_within(WEEK_WINDOW_DAYS)
    }

    /// Open tasks due between today and `days` days from today, both inclusive.
    /// A window reaching past the calendar's end stops at `NaiveDate::MAX`.
    pub fn get_tasks_within(&self, days: u32) -> Result<Vec<Task>> {
        let today = self.clock.today();
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        self.open_due(|due| today <= due && due <= end)
    }

    /// Open tasks due before today.
    pub fn get_tasks_overdue(&self) -> Result<Vec<Task>> {
        let today = self.clock.today();
        self.open_due(|due| due < today)
    }

    /// Marks a task completed. Completing an already completed task refreshes
    /// `completed_at`; there is no way back to open.
    pub fn complete_task(&self, id: &str) -> Result<Option<Task>> {
        let now = self.clock.now();
        self.update(id, |task| {
            task.complete(now);
            Ok(())
        })
    }

    /// Appends a pending subtask, numbered after the existing ones.
    pub fn add_subtask(&self, id: &str, title: &str) -> Result<Option<Task>> {
        let title = require_text("subtask title", title)?;
        self.update(id, |task| {
            task.push_subtask(title);
            Ok(())
        })
    }

    /// Marks one subtask done. `None` when either the task or the subtask is unknown.
    pub fn complete_subtask(&self, task_id: &str, subtask_id: u32) -> Result<Option<Task>> {
        let mut doc = self.store.load()?;
        let Some(idx) = doc.task_index(task_id) else {
            return Ok(None);
        };

        let mut task = Task::try_from(doc.tasks[idx].clone())?;
        let Some(subtask) = task.subtask_mut(subtask_id) else {
            return Ok(None);
        };
        subtask.completed = true;

        doc.tasks[idx] = TaskRecord::from(&task);
        self.store.save(&doc)?;

        info!(
            "event=subtask_complete module=tasks id={} subtask={}",
            task_id, subtask_id
        );
        Ok(Some(task))
    }

    /// Sets or clears the due date.
    pub fn set_due_date(&self, id: &str, due_date: Option<NaiveDateTime>) -> Result<Option<Task>> {
        self.update(id, |task| {
            task.due_date = due_date;
            Ok(())
        })
    }

    /// Files a task under `course`, taking it out of the inbox.
    pub fn organize_task(&self, id: &str, course: &str) -> Result<Option<Task>> {
        let course = require_text("course", course)?;
        self.update(id, |task| {
            task.placement = Placement::Course(course);
            Ok(())
        })
    }

    /// Links a note to a task. The task owns the link; the note records a
    /// back-reference. `None` when either id is unknown.
    pub fn link_note(&self, task_id: &str, note_id: &str) -> Result<Option<Task>> {
        let mut doc = self.store.load()?;
        let (Some(task_idx), Some(note_idx)) = (doc.task_index(task_id), doc.note_index(note_id))
        else {
            return Ok(None);
        };

        let mut task = Task::try_from(doc.tasks[task_idx].clone())?;
        let mut note = Note::try_from(doc.notes[note_idx].clone())?;

        if !task.linked_notes.iter().any(|id| id == note_id) {
            task.linked_notes.push(note_id.to_string());
        }
        if !note.linked_from_tasks.iter().any(|id| id == task_id) {
            note.linked_from_tasks.push(task_id.to_string());
        }

        doc.tasks[task_idx] = TaskRecord::from(&task);
        doc.notes[note_idx] = NoteRecord::from(&note);
        self.store.save(&doc)?;

        info!(
            "event=task_link module=tasks id={} note={}",
            task_id, note_id
        );
        Ok(Some(task))
    }

    fn filtered<F>(&self, keep: F) -> Result<Vec<Task>>
    where
        F: Fn(&Task) -> bool,
    {
        Ok(self.list_tasks()?.into_iter().filter(|t| keep(t)).collect())
    }

    fn open_due<F>(&self, on: F) -> Result<Vec<Task>>
    where
        F: Fn(NaiveDate) -> bool,
    {
        self.filtered(|task| {
            !task.completed && task.due_date.map(|due| on(due.date())).unwrap_or(false)
        })
    }

    fn update<F>(&self, id: &str, change: F) -> Result<Option<Task>>
    where
        F: FnOnce(&mut Task) -> Result<()>,
    {
        let mut doc = self.store.load()?;
        let Some(idx) = doc.task_index(id) else {
            return Ok(None);
        };

        let mut task = Task::try_from(doc.tasks[idx].clone())?;
        change(&mut task)?;
        doc.tasks[idx] = TaskRecord::from(&task);
        self.store.save(&doc)?;

        info!("event=task_update module=tasks id={}", id);
        Ok(Some(task))
    }
}
