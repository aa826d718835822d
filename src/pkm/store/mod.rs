//! # Storage Layer
//!
//! All state is one [`Document`] read and written as a whole. The
//! [`DocumentStore`] trait hides where that document lives so the services can
//! run against a file in production and memory in tests.
//!
//! ## Discipline
//!
//! - Every service call is `load` → mutate in memory → `save`. Nothing is
//!   cached between calls, so two services over the same store always see the
//!   latest saved state.
//! - `save` replaces the whole document. There is no partial update.
//! - There is no locking. Two processes writing concurrently race and the last
//!   save wins. Advisory locking (or an embedded database) is the upgrade path
//!   if that ever matters.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileStore`]: `data.json` in the data directory, written atomically.
//! - [`memory::InMemoryStore`]: no persistence, for tests.

use crate::error::Result;
use crate::schema::Document;

pub mod fs;
pub mod memory;

pub trait DocumentStore {
    /// Load the full document. A store that has never been saved yields an
    /// empty document, never a "not found" error.
    fn load(&self) -> Result<Document>;

    /// Replace the full document.
    fn save(&self, document: &Document) -> Result<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn load(&self) -> Result<Document> {
        (**self).load()
    }

    fn save(&self, document: &Document) -> Result<()> {
        (**self).save(document)
    }
}
