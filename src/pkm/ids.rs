//! # Identifiers
//!
//! Notes and tasks are identified by human-readable strings of the form
//! `{prefix}_{YYYYMMDD_HHMMSS}_{xyz}`, e.g. `n_20251123_103045_a7c`.
//!
//! The random suffix only has 36^3 = 46656 values, so two ids generated in the
//! same second can collide. On its own the format is not unique; uniqueness is
//! restored by [`generate_unique`], which the services call with "already in
//! the document" as the rejection test. Ids are therefore unique per store,
//! which is the only scope that matters for a single-user data file.
//!
//! Subtasks are not covered here: they carry small integer ids local to their
//! parent task.

use crate::error::{PkmError, Result};
use chrono::Local;
use rand::Rng;
use std::cell::Cell;

pub const NOTE_PREFIX: &str = "n";
pub const TASK_PREFIX: &str = "t";
pub const COURSE_PREFIX: &str = "c";

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 3;
const MAX_ATTEMPTS: usize = 64;

pub trait IdGenerator {
    fn generate(&self, prefix: &str) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn generate(&self, prefix: &str) -> String {
        (**self).generate(prefix)
    }
}

/// Production generator: local timestamp plus a random lowercase-alphanumeric suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn generate(&self, prefix: &str) -> String {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..SUFFIX_ALPHABET.len());
                SUFFIX_ALPHABET[idx] as char
            })
            .collect();
        format!("{}_{}_{}", prefix, timestamp, suffix)
    }
}

/// Deterministic generator for tests: `{prefix}_1`, `{prefix}_2`, ...
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    next: Cell<u64>,
}

impl SequenceIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn generate(&self, prefix: &str) -> String {
        let n = self.next.get() + 1;
        self.next.set(n);
        format!("{}_{}", prefix, n)
    }
}

/// Generates ids until one is not rejected by `is_taken`.
pub fn generate_unique<G, F>(generator: &G, prefix: &str, is_taken: F) -> Result<String>
where
    G: IdGenerator + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..MAX_ATTEMPTS {
        let id = generator.generate(prefix);
        if !is_taken(&id) {
            return Ok(id);
        }
        log::debug!("event=id_collision module=ids prefix={}", prefix);
    }
    Err(PkmError::IdSpaceExhausted(prefix.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_suffix_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit()
    }

    #[test]
    fn timestamp_id_has_expected_shape() {
        let id = TimestampIdGenerator.generate(NOTE_PREFIX);
        let parts: Vec<&str> = id.split('_').collect();

        assert_eq!(parts.len(), 4, "unexpected id: {}", id);
        assert_eq!(parts[0], "n");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[3].len(), 3);
        assert!(parts[3].chars().all(is_suffix_char));
    }

    #[test]
    fn prefix_is_preserved() {
        assert!(TimestampIdGenerator.generate(TASK_PREFIX).starts_with("t_"));
        assert!(TimestampIdGenerator.generate(COURSE_PREFIX).starts_with("c_"));
    }

    #[test]
    fn sequence_generator_counts_up() {
        let ids = SequenceIdGenerator::new();
        assert_eq!(ids.generate("n"), "n_1");
        assert_eq!(ids.generate("t"), "t_2");
    }

    #[test]
    fn ten_thousand_unique_ids_with_same_prefix() {
        // 10k draws from a 46656-value suffix space collide almost surely when they
        // share a second, so the raw generator alone is not enough.
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let id = generate_unique(&TimestampIdGenerator, NOTE_PREFIX, |candidate| {
                seen.contains(candidate)
            })
            .unwrap();
            assert!(seen.insert(id));
        }
        assert_eq!(seen.len(), 10_000);
    }

    #[test]
    fn gives_up_when_every_candidate_is_taken() {
        let err = generate_unique(&TimestampIdGenerator, "n", |_| true).unwrap_err();
        assert!(matches!(err, PkmError::IdSpaceExhausted(p) if p == "n"));
    }

    #[test]
    fn retries_past_taken_ids() {
        let ids = SequenceIdGenerator::new();
        let id = generate_unique(&ids, "n", |c| c == "n_1" || c == "n_2").unwrap();
        assert_eq!(id, "n_3");
    }
}
