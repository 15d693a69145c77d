//! Core entity structures
//!
//! Plain data carried by the store and the wire. Revisions are immutable
//! once created; assertions mutate only through the pointer-update protocol
//! in the store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::identity::Timestamp;

/// Visibility class of an assertion: tied to one repository, or to an entire
/// organization (repository-independent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Repo,
    Org,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Repo => "repo",
            Scope::Org => "org",
        }
    }

    /// Lenient parse used during payload normalization: anything that is not
    /// literally `org` is treated as a repo-scoped claim.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "org" => Scope::Org,
            _ => Scope::Repo,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scoped knowledge claim with a pointer to its latest revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    pub assertion_id: String,
    pub knowledge_key: String,
    pub scope: Scope,
    pub org_id: String,
    /// Meaningful only for repo-scoped assertions.
    pub project_id: String,
    /// Meaningful only for repo-scoped assertions.
    pub repo_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Number of revisions ever appended for this assertion id.
    pub revision_count: i64,
    /// Id of the most recently appended revision; empty until the first one.
    pub current_revision_id: String,
    /// Mirrors the latest revision's status.
    pub status: String,
}

/// An immutable, numbered snapshot of an assertion's content and provenance
/// at submission time.
///
/// The scope/key/project/repo fields are denormalized copies from the
/// submission and may drift from the parent assertion if later submissions
/// change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub revision_id: String,
    pub assertion_id: String,
    /// 1-based, strictly increasing per assertion, no gaps.
    pub revision_number: i64,
    pub status: String,
    pub knowledge_key: String,
    pub scope: Scope,
    pub project_id: String,
    pub repo_id: String,
    /// Correlation to the originating event, if any.
    pub event_id: String,
    /// Optional lineage pointer.
    pub parent_revision_id: String,
    /// Ordered references to other assertions/keys.
    pub influences: Vec<Value>,
    /// Free-form evidence map (source, scope, influence, event correlation).
    pub provenance: Value,
    /// Free-form payload body.
    pub content: Value,
    pub created_at: Timestamp,
}

/// Append-only audit record of an inbound agent event submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub request_id: String,
    pub received_at: Timestamp,
    /// Raw event body, verbatim.
    pub event: Value,
}

/// Append-only audit record of a promotion submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionRecord {
    pub promotion_id: String,
    pub request_id: String,
    pub received_at: Timestamp,
    pub event: Value,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::now_utc;
    use serde_json::json;

    #[test]
    fn test_scope_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Scope::Repo).unwrap(), "\"repo\"");
        assert_eq!(serde_json::to_string(&Scope::Org).unwrap(), "\"org\"");
    }

    #[test]
    fn test_scope_parse_lenient() {
        assert_eq!(Scope::parse_lenient("org"), Scope::Org);
        assert_eq!(Scope::parse_lenient("repo"), Scope::Repo);
        assert_eq!(Scope::parse_lenient("banana"), Scope::Repo);
        assert_eq!(Scope::parse_lenient(""), Scope::Repo);
    }

    #[test]
    fn test_assertion_round_trip() {
        let now = now_utc();
        let assertion = Assertion {
            assertion_id: "ast_repo_p1_r1_k".to_string(),
            knowledge_key: "k".to_string(),
            scope: Scope::Repo,
            org_id: "o1".to_string(),
            project_id: "p1".to_string(),
            repo_id: "r1".to_string(),
            created_at: now,
            updated_at: now,
            revision_count: 0,
            current_revision_id: String::new(),
            status: "proposed".to_string(),
        };

        let rendered = serde_json::to_string(&assertion).unwrap();
        let parsed: Assertion = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, assertion);
    }

    #[test]
    fn test_revision_wire_shape() {
        let revision = Revision {
            revision_id: "rev_0123456789abcdef0123".to_string(),
            assertion_id: "ast_org_o1_k".to_string(),
            revision_number: 1,
            status: "proposed".to_string(),
            knowledge_key: "k".to_string(),
            scope: Scope::Org,
            project_id: String::new(),
            repo_id: String::new(),
            event_id: String::new(),
            parent_revision_id: String::new(),
            influences: vec![json!({"assertion_id": "ast_org_o1_other"})],
            provenance: json!({"source": "test"}),
            content: json!({"title": "t"}),
            created_at: now_utc(),
        };

        let rendered = serde_json::to_value(&revision).unwrap();
        assert_eq!(rendered["scope"], "org");
        assert_eq!(rendered["revision_number"], 1);
        assert_eq!(rendered["provenance"]["source"], "test");
    }
}
