//! TKD Storage - Guarded Store and Revision Ledger
//!
//! One mutex serializes every read and write of the four collections
//! (assertions, revisions, events, promotions), and mutating submissions
//! write the snapshot to disk before releasing the lock. The coarse single
//! lock trades throughput for a trivially correct total order, which is all
//! a test-harness mock needs.

pub mod snapshot;

pub use snapshot::{load_state, save_state, StoreState};

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tkd_core::{
    assertion_identity, normalize, now_utc, random_id, Assertion, AssertionFilter, EventRecord,
    PromotionRecord, Revision, Scope, StoreError, StoreResult, SubmissionEnvelope,
};

// ============================================================================
// VIEW TYPES
// ============================================================================

/// Receipt returned for an accepted assertion submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub assertion_id: String,
    pub revision_id: String,
    pub revision_number: i64,
    pub scope: Scope,
    pub knowledge_key: String,
}

/// Collection sizes, reported by the health endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub assertions: usize,
    pub revisions: usize,
    pub events: usize,
    pub promotions: usize,
}

/// An assertion paired with its current revision, if one exists yet.
pub type CurrentRecord = (Assertion, Option<Revision>);

/// Revision history for one assertion, newest revision first.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub assertion: Assertion,
    pub revisions: Vec<Revision>,
}

// ============================================================================
// KNOWLEDGE STORE
// ============================================================================

/// In-memory knowledge store mirrored to a JSON snapshot on disk.
///
/// Constructed once at startup and shared by handle; all access to the
/// collections goes through the internal lock.
pub struct KnowledgeStore {
    state: Mutex<StoreState>,
    snapshot_path: PathBuf,
}

impl KnowledgeStore {
    /// Open a store backed by the given snapshot file, loading any state a
    /// previous run left behind.
    pub fn open(snapshot_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let snapshot_path = snapshot_path.into();
        let state = snapshot::load_state(&snapshot_path)?;
        Ok(Self {
            state: Mutex::new(state),
            snapshot_path,
        })
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Record an inbound agent event, verbatim.
    pub fn record_event(&self, body: Value, request_id: &str) -> StoreResult<()> {
        let record = EventRecord {
            request_id: request_id.to_string(),
            received_at: now_utc(),
            event: body,
        };
        let mut state = self.lock()?;
        state.events.push(record);
        snapshot::save_state(&self.snapshot_path, &state)
    }

    /// Record a promotion submission; returns the generated promotion id.
    pub fn record_promotion(&self, body: Value, request_id: &str) -> StoreResult<String> {
        let promotion_id = random_id("prom");
        let record = PromotionRecord {
            promotion_id: promotion_id.clone(),
            request_id: request_id.to_string(),
            received_at: now_utc(),
            event: body,
        };
        let mut state = self.lock()?;
        state.promotions.push(record);
        snapshot::save_state(&self.snapshot_path, &state)?;
        Ok(promotion_id)
    }

    /// Submit an assertion: normalize the envelope, resolve identity, append
    /// a revision, and advance the current pointer, all in one critical
    /// section that ends with the snapshot write.
    ///
    /// Concurrent submissions to the same identity are linearized by the
    /// lock, so revision numbers are gap-free and the pointer always names
    /// the last-committed revision. Every submission keeps its own revision
    /// record even when a later one overwrites the pointer.
    pub fn submit_assertion(&self, body: Value, request_id: &str) -> StoreResult<SubmissionReceipt> {
        let envelope = SubmissionEnvelope::from_body(&body);
        let payload = normalize(&envelope);
        let assertion_id = assertion_identity(
            payload.scope,
            &payload.org_id,
            &payload.project_id,
            &payload.repo_id,
            &payload.knowledge_key,
            &payload.assertion_id,
        );

        let mut state = self.lock()?;
        let now = now_utc();

        let revision_number = match state.assertions.get(&assertion_id) {
            Some(existing) => existing.revision_count + 1,
            None => {
                state.assertions.insert(
                    assertion_id.clone(),
                    Assertion {
                        assertion_id: assertion_id.clone(),
                        knowledge_key: payload.knowledge_key.clone(),
                        scope: payload.scope,
                        org_id: payload.org_id.clone(),
                        project_id: payload.project_id.clone(),
                        repo_id: payload.repo_id.clone(),
                        created_at: now,
                        updated_at: now,
                        revision_count: 0,
                        current_revision_id: String::new(),
                        status: payload.status.clone(),
                    },
                );
                1
            }
        };

        let revision_id = random_id("rev");
        state.assertion_revisions.insert(
            revision_id.clone(),
            Revision {
                revision_id: revision_id.clone(),
                assertion_id: assertion_id.clone(),
                revision_number,
                status: payload.status.clone(),
                knowledge_key: payload.knowledge_key.clone(),
                scope: payload.scope,
                project_id: payload.project_id.clone(),
                repo_id: payload.repo_id.clone(),
                event_id: envelope.event_id.clone(),
                parent_revision_id: payload.parent_revision_id.clone(),
                influences: payload.influences.clone(),
                provenance: envelope.provenance.clone(),
                content: payload.content.clone(),
                created_at: now,
            },
        );

        // the assertion exists at this point; advance the current pointer
        if let Some(assertion) = state.assertions.get_mut(&assertion_id) {
            assertion.updated_at = now;
            assertion.revision_count = revision_number;
            assertion.current_revision_id = revision_id.clone();
            assertion.status = payload.status.clone();
        }

        // every assertion submission is also captured as an event
        state.events.push(EventRecord {
            request_id: request_id.to_string(),
            received_at: now,
            event: body,
        });

        snapshot::save_state(&self.snapshot_path, &state)?;

        Ok(SubmissionReceipt {
            assertion_id,
            revision_id,
            revision_number,
            scope: payload.scope,
            knowledge_key: payload.knowledge_key,
        })
    }

    /// List assertions matching the filter, newest `updated_at` first, each
    /// paired with its current revision. An assertion with no revision yet
    /// pairs with `None` rather than erroring.
    pub fn current_records(&self, filter: &AssertionFilter) -> StoreResult<Vec<CurrentRecord>> {
        let state = self.lock()?;
        let mut matched: Vec<Assertion> = state
            .assertions
            .values()
            .filter(|assertion| filter.matches(assertion))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(matched
            .into_iter()
            .map(|assertion| {
                let current = state
                    .assertion_revisions
                    .get(&assertion.current_revision_id)
                    .cloned();
                (assertion, current)
            })
            .collect())
    }

    /// Revision history for one assertion, sorted by revision number
    /// descending. Unknown assertion ids are an error.
    pub fn timeline(&self, assertion_id: &str) -> StoreResult<TimelineView> {
        let state = self.lock()?;
        let assertion = state
            .assertions
            .get(assertion_id)
            .cloned()
            .ok_or_else(|| StoreError::AssertionNotFound {
                assertion_id: assertion_id.to_string(),
            })?;

        let mut revisions: Vec<Revision> = state
            .assertion_revisions
            .values()
            .filter(|revision| revision.assertion_id == assertion_id)
            .cloned()
            .collect();
        revisions.sort_by(|a, b| b.revision_number.cmp(&a.revision_number));

        Ok(TimelineView {
            assertion,
            revisions,
        })
    }

    /// Sizes of the four collections.
    pub fn counts(&self) -> StoreResult<StoreCounts> {
        let state = self.lock()?;
        Ok(StoreCounts {
            assertions: state.assertions.len(),
            revisions: state.assertion_revisions.len(),
            events: state.events.len(),
            promotions: state.promotions.len(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
