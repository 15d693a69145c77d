//! Snapshot persistence
//!
//! The whole store serializes to one JSON document with four top-level
//! collections. Loading merges against empty defaults so a partially-written
//! or older-schema snapshot never fails for a missing collection; an
//! unreadable or unparsable file is an error the caller treats as fatal at
//! startup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tkd_core::{Assertion, EventRecord, PromotionRecord, Revision, StoreError, StoreResult};

/// Full serialized state of the four collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreState {
    pub assertions: HashMap<String, Assertion>,
    pub assertion_revisions: HashMap<String, Revision>,
    pub events: Vec<EventRecord>,
    pub promotions: Vec<PromotionRecord>,
}

/// Load a snapshot from disk. An absent file yields the default empty state.
pub fn load_state(path: &Path) -> StoreResult<StoreState> {
    if !path.exists() {
        return Ok(StoreState::default());
    }
    let raw = fs::read_to_string(path).map_err(|err| StoreError::SnapshotRead {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|err| StoreError::SnapshotRead {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Overwrite the snapshot file with the full serialized state, pretty-printed
/// with a trailing newline. The parent directory is created if needed.
pub fn save_state(path: &Path, state: &StoreState) -> StoreResult<()> {
    let write_err = |reason: String| StoreError::SnapshotWrite {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| write_err(err.to_string()))?;
    }
    let mut rendered =
        serde_json::to_string_pretty(state).map_err(|err| write_err(err.to_string()))?;
    rendered.push('\n');
    fs::write(path, rendered).map_err(|err| write_err(err.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_empty_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = load_state(&dir.path().join("absent.json")).expect("load");
        assert_eq!(state, StoreState::default());
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("state.json");

        let mut state = StoreState::default();
        state.events.push(EventRecord {
            request_id: "req_0123456789abcdef0123".to_string(),
            received_at: tkd_core::now_utc(),
            event: serde_json::json!({"kind": "test"}),
        });

        save_state(&path, &state).expect("save");
        let loaded = load_state(&path).expect("load");
        assert_eq!(loaded, state);

        let raw = std::fs::read_to_string(&path).expect("read");
        assert!(raw.ends_with('\n'));
    }

    #[test]
    fn test_partial_snapshot_merges_missing_collections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{\"events\": []}\n").expect("write");

        let state = load_state(&path).expect("load");
        assert!(state.assertions.is_empty());
        assert!(state.assertion_revisions.is_empty());
        assert!(state.promotions.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not-json").expect("write");

        let err = load_state(&path).expect_err("corrupt snapshot");
        assert!(matches!(err, StoreError::SnapshotRead { .. }));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").expect("write");

        // parent "directory" is a regular file
        let err = save_state(&blocker.join("state.json"), &StoreState::default())
            .expect_err("unwritable path");
        assert!(matches!(err, StoreError::SnapshotWrite { .. }));
    }
}
