//! TKD Core - Entity Types, Identity, and Normalization
//!
//! Pure data structures and pure functions for the TKD mock
//! knowledge/provenance service. The store and API crates depend on this;
//! nothing here performs I/O.

pub mod entities;
pub mod error;
pub mod filter;
pub mod identity;
pub mod payload;

pub use entities::{Assertion, EventRecord, PromotionRecord, Revision, Scope};
pub use error::{StoreError, StoreResult};
pub use filter::AssertionFilter;
pub use identity::{assertion_identity, now_utc, random_id, slugify, Timestamp};
pub use payload::{
    normalize, AssertionPayload, CanonicalPayload, OrganizationRef, SubmissionEnvelope,
    WorkspaceRef, DEFAULT_STATUS, PAYLOAD_SCHEMA_VERSION,
};
