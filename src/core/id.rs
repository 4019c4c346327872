//! Identifier generation for newly created entities

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of globally unique, opaque entity identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce the next identifier
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs, the production generator
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` identifiers for tests and reproducible demos
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    /// Start counting at 1 with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_ids_are_unique() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new("gen");
        assert_eq!(ids.next_id(), "gen-1");
        assert_eq!(ids.next_id(), "gen-2");
    }
}
