//! Error types for TKD store operations

use std::path::PathBuf;
use thiserror::Error;

/// Store layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Assertion not found: {assertion_id}")]
    AssertionNotFound { assertion_id: String },

    #[error("State lock poisoned")]
    LockPoisoned,

    #[error("Snapshot read failed for {}: {reason}", .path.display())]
    SnapshotRead { path: PathBuf, reason: String },

    #[error("Snapshot write failed for {}: {reason}", .path.display())]
    SnapshotWrite { path: PathBuf, reason: String },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// TESTS
// =============================================================================
