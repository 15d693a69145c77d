//! Identity derivation for knowledge assertions
//!
//! Assertion identifiers are deterministic slugs of the owning scope, so the
//! same knowledge key reported from the same place always lands on the same
//! assertion. Revision, request, and promotion ids are random.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::Scope;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Length of the random hex tail on generated identifiers.
const ID_TAIL_LEN: usize = 20;

/// Generate a random identifier of the form `<prefix>_<20 hex chars>`.
pub fn random_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..ID_TAIL_LEN])
}

/// Reduce a raw identifier to a safe slug token.
///
/// Lowercases and trims the input, keeps alphanumerics, maps the common
/// separator characters (space, `/`, `.`, `_`, `-`) to `-`, drops everything
/// else, collapses runs of `-`, and strips leading/trailing `-`. An input
/// that slugs down to nothing becomes the literal `unknown`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut prev_dash = false;
    for ch in value.to_lowercase().trim().chars() {
        if ch.is_alphanumeric() {
            slug.push(ch);
            prev_dash = false;
        } else if matches!(ch, ' ' | '/' | '.' | '_' | '-') {
            if !prev_dash {
                slug.push('-');
            }
            prev_dash = true;
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "unknown".to_string()
    } else {
        slug.to_string()
    }
}

/// Derive the stable assertion id for a submission.
///
/// A non-empty `explicit_id` wins verbatim: identity is caller-controlled and
/// no uniqueness check is performed, so colliding explicit ids share one
/// assertion history. Org-scoped identities deliberately ignore
/// `project_id`/`repo_id` so every repository under an organization resolves
/// the same knowledge key to one assertion.
pub fn assertion_identity(
    scope: Scope,
    org_id: &str,
    project_id: &str,
    repo_id: &str,
    knowledge_key: &str,
    explicit_id: &str,
) -> String {
    if !explicit_id.is_empty() {
        return explicit_id.to_string();
    }
    match scope {
        Scope::Org => format!("ast_org_{}_{}", slugify(org_id), slugify(knowledge_key)),
        Scope::Repo => format!(
            "ast_repo_{}_{}_{}",
            slugify(project_id),
            slugify(repo_id),
            slugify(knowledge_key)
        ),
    }
}

// =============================================================================
// TESTS
// =============================================================================
