//! Outcome of committing a local change.
//!
//! A mutation is applied in memory first and the full snapshot is written
//! afterwards. The write result travels next to the mutation result instead
//! of replacing it: a failed write leaves the mutation in place.

use kanban_persistence::{codec, SnapshotStore};
use serde::Serialize;
use tracing::warn;

/// What happened to the snapshot write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No write was needed.
    Skipped,
    /// The store accepted the snapshot.
    Saved,
    /// The store rejected or could not take the snapshot.
    Failed(String),
}

impl SaveOutcome {
    /// Returns true if the snapshot reached the store.
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }

    /// Returns true if the write was attempted and failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, SaveOutcome::Failed(_))
    }
}

/// Result of a successful mutation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Local revision after the request.
    pub revision: u64,
    /// False when the request was a no-op.
    pub changed: bool,
    /// Snapshot write outcome.
    pub save: SaveOutcome,
}

impl Commit {
    pub(crate) fn unchanged(revision: u64) -> Self {
        Self {
            revision,
            changed: false,
            save: SaveOutcome::Skipped,
        }
    }
}

/// Encodes `value` and overwrites `key`, logging instead of failing.
pub(crate) fn write_snapshot<S, T>(store: &S, key: &str, value: &T) -> SaveOutcome
where
    S: SnapshotStore,
    T: Serialize + ?Sized,
{
    match codec::encode(value).and_then(|data| store.set(key, &data)) {
        Ok(()) => SaveOutcome::Saved,
        Err(e) => {
            warn!(key, error = %e, "Snapshot write failed; keeping in-memory state");
            SaveOutcome::Failed(e.to_string())
        }
    }
}
