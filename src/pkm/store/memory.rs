use super::DocumentStore;
use crate::error::{PkmError, Result};
use crate::schema::Document;
use std::cell::{Cell, RefCell};

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Uses `RefCell` for interior mutability since pkm is single-threaded, which
/// lets `DocumentStore` take `&self` everywhere.
#[derive(Default)]
pub struct InMemoryStore {
    document: RefCell<Document>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document: RefCell::new(document),
            ..Self::default()
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Make every subsequent save fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn snapshot(&self) -> Document {
        self.document.borrow().clone()
    }
}

impl DocumentStore for InMemoryStore {
    fn load(&self) -> Result<Document> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, document: &Document) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(PkmError::Io(std::io::Error::other("simulated write error")));
        }
        *self.document.borrow_mut() = document.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SubtaskRecord;

    #[test]
    fn starts_empty() {
        let store = InMemoryStore::new();
        assert_eq!(store.load().unwrap(), Document::default());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_replaces_whole_document() {
        let store = InMemoryStore::new();
        let mut doc = store.load().unwrap();
        doc.tasks.push(crate::schema::TaskRecord {
            id: "t_1".into(),
            title: "x".into(),
            created_at: "2025-11-23T10:00:00".into(),
            due_date: None,
            priority: "medium".into(),
            completed: false,
            completed_at: None,
            course: None,
            linked_notes: vec![],
            subtasks: vec![SubtaskRecord {
                id: 1,
                title: "a".into(),
                completed: false,
            }],
        });
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);

        store.save(&Document::default()).unwrap();
        assert!(store.load().unwrap().tasks.is_empty());
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn simulated_write_error_leaves_document_untouched() {
        let store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        assert!(store.save(&Document::default()).is_err());
        assert_eq!(store.save_count(), 0);
    }
}
