//! # Services
//!
//! Business logic over a [`DocumentStore`](crate::store::DocumentStore).
//!
//! Each public method is one complete load → mutate → save cycle and holds no
//! state between calls. Lookups by id return `Ok(None)` when the id is unknown;
//! "not found" is an expected outcome, not an error. A lookup that misses never
//! writes to the store.
//!
//! Services are generic over the store, the id generator and the clock so the
//! same code runs against `data.json` in production and against
//! [`InMemoryStore`](crate::store::memory::InMemoryStore), a
//! [`SequenceIdGenerator`](crate::ids::SequenceIdGenerator) and a
//! [`FixedClock`](crate::clock::FixedClock) in tests.

pub mod notes;
pub mod tasks;

pub use notes::NoteService;
pub use tasks::TaskService;

use crate::error::{PkmError, Result};

/// Trims `value`, rejecting it when nothing is left.
pub(crate) fn require_text(what: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PkmError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::clock::FixedClock;
    use crate::ids::SequenceIdGenerator;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    /// Everything a service needs, deterministic.
    pub struct ServiceFixture {
        pub store: InMemoryStore,
        pub ids: SequenceIdGenerator,
        pub clock: FixedClock,
    }

    impl Default for ServiceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ServiceFixture {
        /// Fixed at Wednesday 2025-11-26 10:00.
        pub fn new() -> Self {
            Self::at(NaiveDate::from_ymd_opt(2025, 11, 26).unwrap_or_default())
        }

        pub fn at(date: NaiveDate) -> Self {
            Self {
                store: InMemoryStore::new(),
                ids: SequenceIdGenerator::new(),
                clock: FixedClock::at(date, 10, 0),
            }
        }

        pub fn today(&self) -> NaiveDate {
            self.clock.0.date()
        }

        pub fn notes(
            &self,
        ) -> super::NoteService<&InMemoryStore, &SequenceIdGenerator, FixedClock> {
            super::NoteService::with_parts(&self.store, &self.ids, self.clock)
        }

        pub fn tasks(
            &self,
        ) -> super::TaskService<&InMemoryStore, &SequenceIdGenerator, FixedClock> {
            super::TaskService::with_parts(&self.store, &self.ids, self.clock)
        }
    }
}
