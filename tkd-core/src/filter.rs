//! Equality filters for current-assertion listings
//!
//! Mirrors the query-parameter surface of the listing endpoint: every field
//! is an optional exact-match predicate, and an absent or empty value places
//! no constraint.

use serde::{Deserialize, Serialize};

use crate::entities::Assertion;

/// Optional equality predicates over assertions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssertionFilter {
    pub knowledge_key: Option<String>,
    pub scope: Option<String>,
    pub project_id: Option<String>,
    pub repo_id: Option<String>,
}

impl AssertionFilter {
    pub fn matches(&self, assertion: &Assertion) -> bool {
        field_matches(self.knowledge_key.as_deref(), &assertion.knowledge_key)
            && field_matches(self.scope.as_deref(), assertion.scope.as_str())
            && field_matches(self.project_id.as_deref(), &assertion.project_id)
            && field_matches(self.repo_id.as_deref(), &assertion.repo_id)
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some("") => true,
        Some(value) => value == actual,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Scope;
    use crate::identity::now_utc;

    fn assertion(key: &str, scope: Scope, project: &str, repo: &str) -> Assertion {
        let now = now_utc();
        Assertion {
            assertion_id: format!("ast_test_{}", key),
            knowledge_key: key.to_string(),
            scope,
            org_id: "o1".to_string(),
            project_id: project.to_string(),
            repo_id: repo.to_string(),
            created_at: now,
            updated_at: now,
            revision_count: 1,
            current_revision_id: "rev_x".to_string(),
            status: "proposed".to_string(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = AssertionFilter::default();
        assert!(filter.matches(&assertion("k1", Scope::Repo, "p1", "r1")));
        assert!(filter.matches(&assertion("k2", Scope::Org, "", "")));
    }

    #[test]
    fn test_empty_string_is_unconstrained() {
        let filter = AssertionFilter {
            knowledge_key: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.matches(&assertion("k1", Scope::Repo, "p1", "r1")));
    }

    #[test]
    fn test_single_field_filter() {
        let filter = AssertionFilter {
            knowledge_key: Some("k1".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&assertion("k1", Scope::Repo, "p1", "r1")));
        assert!(!filter.matches(&assertion("k2", Scope::Repo, "p1", "r1")));
    }

    #[test]
    fn test_scope_filter_compares_wire_form() {
        let filter = AssertionFilter {
            scope: Some("org".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&assertion("k1", Scope::Org, "", "")));
        assert!(!filter.matches(&assertion("k1", Scope::Repo, "p1", "r1")));
    }

    #[test]
    fn test_all_fields_must_match() {
        let filter = AssertionFilter {
            knowledge_key: Some("k1".to_string()),
            scope: Some("repo".to_string()),
            project_id: Some("p1".to_string()),
            repo_id: Some("r1".to_string()),
        };
        assert!(filter.matches(&assertion("k1", Scope::Repo, "p1", "r1")));
        assert!(!filter.matches(&assertion("k1", Scope::Repo, "p1", "r2")));
    }
}
