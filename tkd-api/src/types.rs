//! Wire types for the TKD mock API

use serde::{Deserialize, Serialize};
use tkd_core::{Assertion, Revision, Scope, Timestamp};
use tkd_storage::StoreCounts;

/// GET /healthz response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub time: Timestamp,
    pub counts: StoreCounts,
}

/// One entry in the current-assertions listing.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentRecord {
    pub assertion: Assertion,
    /// The current revision, rendered as an empty object for an assertion
    /// that has no revision yet.
    #[serde(serialize_with = "revision_or_empty")]
    pub current_revision: Option<Revision>,
}

/// GET /v1/knowledge/assertions/current response body.
#[derive(Debug, Clone, Serialize)]
pub struct ListAssertionsResponse {
    pub count: usize,
    pub records: Vec<CurrentRecord>,
}

/// GET /v1/knowledge/assertions/:assertion_id/timeline response body.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineResponse {
    pub assertion: Assertion,
    pub count: usize,
    pub revisions: Vec<Revision>,
}

/// POST /v1/agents/events response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAccepted {
    pub accepted: bool,
    pub request_id: String,
    pub path: String,
}

/// POST /v1/knowledge/assertions response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionAccepted {
    pub accepted: bool,
    pub request_id: String,
    pub path: String,
    pub assertion_id: String,
    pub revision_id: String,
    pub revision_number: i64,
    pub scope: Scope,
    pub knowledge_key: String,
}

/// POST /v1/knowledge/promotions response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionAccepted {
    pub accepted: bool,
    pub request_id: String,
    pub path: String,
    pub promotion_id: String,
}

fn revision_or_empty<S>(revision: &Option<Revision>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::Serialize as _;
    match revision {
        Some(revision) => revision.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tkd_core::now_utc;

    fn assertion() -> Assertion {
        let now = now_utc();
        Assertion {
            assertion_id: "ast_repo_p1_r1_k".to_string(),
            knowledge_key: "k".to_string(),
            scope: Scope::Repo,
            org_id: String::new(),
            project_id: "p1".to_string(),
            repo_id: "r1".to_string(),
            created_at: now,
            updated_at: now,
            revision_count: 0,
            current_revision_id: String::new(),
            status: "proposed".to_string(),
        }
    }

    #[test]
    fn test_missing_current_revision_renders_as_empty_object() {
        let record = CurrentRecord {
            assertion: assertion(),
            current_revision: None,
        };
        let rendered = serde_json::to_value(&record).unwrap();
        assert_eq!(rendered["current_revision"], serde_json::json!({}));
    }

    #[test]
    fn test_accepted_response_wire_shape() {
        let accepted = AssertionAccepted {
            accepted: true,
            request_id: "req_0123456789abcdef0123".to_string(),
            path: "/v1/knowledge/assertions".to_string(),
            assertion_id: "ast_repo_p1_r1_k".to_string(),
            revision_id: "rev_0123456789abcdef0123".to_string(),
            revision_number: 1,
            scope: Scope::Repo,
            knowledge_key: "k".to_string(),
        };
        let rendered = serde_json::to_value(&accepted).unwrap();
        assert_eq!(rendered["accepted"], true);
        assert_eq!(rendered["scope"], "repo");
        assert_eq!(rendered["revision_number"], 1);
    }
}
