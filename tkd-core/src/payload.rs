//! Submission envelope and payload normalization
//!
//! Inbound assertion submissions arrive as loosely-shaped JSON envelopes.
//! The normalizer discriminates between payloads that already declare the
//! canonical schema version (shallow-copied, not re-derived) and arbitrary
//! raw payloads (synthesized into canonical form), then fills any field that
//! is still missing with its documented default. Pure transformation, no
//! side effects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::Scope;
use crate::identity::slugify;

/// Schema version marking an already-canonical assertion payload.
pub const PAYLOAD_SCHEMA_VERSION: &str = "tkd.assertion.payload.v0";

/// Default status for submissions that do not declare one.
pub const DEFAULT_STATUS: &str = "proposed";

/// Workspace section of a submission envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceRef {
    pub id: Option<String>,
    pub scope: Option<String>,
    pub project_id: Option<String>,
    pub repo_id: Option<String>,
}

/// Organization section of a submission envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationRef {
    pub id: Option<String>,
}

/// Loosely-shaped assertion submission envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionEnvelope {
    pub payload: Value,
    pub workspace: WorkspaceRef,
    pub organization: OrganizationRef,
    pub provenance: Value,
    pub event_id: String,
}

impl Default for SubmissionEnvelope {
    fn default() -> Self {
        Self {
            payload: Value::Object(Map::new()),
            workspace: WorkspaceRef::default(),
            organization: OrganizationRef::default(),
            provenance: Value::Object(Map::new()),
            event_id: String::new(),
        }
    }
}

impl SubmissionEnvelope {
    /// Lenient parse of a raw request body. A body that does not look like a
    /// submission envelope degrades to the defaults instead of failing.
    pub fn from_body(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }
}

/// Discriminated submission payload: either a payload that already declares
/// the canonical schema version, or an arbitrary raw body that must be
/// synthesized into one.
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionPayload {
    Canonical(Map<String, Value>),
    Raw(Value),
}

impl AssertionPayload {
    pub fn classify(payload: &Value) -> Self {
        if let Some(map) = payload.as_object() {
            if map.get("schema_version").and_then(Value::as_str) == Some(PAYLOAD_SCHEMA_VERSION) {
                return AssertionPayload::Canonical(map.clone());
            }
        }
        AssertionPayload::Raw(payload.clone())
    }
}

/// Canonical assertion payload with every field defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPayload {
    pub schema_version: String,
    pub knowledge_key: String,
    pub scope: Scope,
    pub status: String,
    pub influences: Vec<Value>,
    pub content: Value,
    pub project_id: String,
    pub repo_id: String,
    pub org_id: String,
    /// Explicit identity override; empty means "derive".
    pub assertion_id: String,
    pub parent_revision_id: String,
}

/// Normalize a submission envelope into a canonical payload.
pub fn normalize(envelope: &SubmissionEnvelope) -> CanonicalPayload {
    let workspace = &envelope.workspace;
    let workspace_scope = non_empty(workspace.scope.as_deref());
    let org_id = envelope.organization.id.clone().unwrap_or_default();
    let project_id = workspace
        .project_id
        .clone()
        .or_else(|| workspace.id.clone())
        .unwrap_or_default();
    let repo_id = workspace.repo_id.clone().unwrap_or_default();

    match AssertionPayload::classify(&envelope.payload) {
        AssertionPayload::Canonical(map) => CanonicalPayload {
            schema_version: PAYLOAD_SCHEMA_VERSION.to_string(),
            knowledge_key: str_field(&map, "knowledge_key")
                .unwrap_or_else(|| "unknown".to_string()),
            scope: str_field(&map, "scope")
                .as_deref()
                .or(workspace_scope)
                .map(Scope::parse_lenient)
                .unwrap_or_default(),
            status: str_field(&map, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            influences: array_field(&map, "influences"),
            content: map.get("content").cloned().unwrap_or_else(empty_object),
            project_id: str_field(&map, "project_id").unwrap_or(project_id),
            repo_id: str_field(&map, "repo_id").unwrap_or(repo_id),
            org_id: str_field(&map, "org_id").unwrap_or(org_id),
            assertion_id: str_field(&map, "assertion_id").unwrap_or_default(),
            parent_revision_id: str_field(&map, "parent_revision_id").unwrap_or_default(),
        },
        AssertionPayload::Raw(raw) => {
            let map = raw.as_object().cloned().unwrap_or_default();
            let title = str_field(&map, "title").unwrap_or_else(|| "untitled".to_string());
            CanonicalPayload {
                schema_version: PAYLOAD_SCHEMA_VERSION.to_string(),
                knowledge_key: str_field(&map, "knowledge_key")
                    .filter(|key| !key.is_empty())
                    .unwrap_or_else(|| slugify(&title)),
                scope: str_field(&map, "scope")
                    .filter(|scope| !scope.is_empty())
                    .as_deref()
                    .or(workspace_scope)
                    .map(Scope::parse_lenient)
                    .unwrap_or_default(),
                status: str_field(&map, "status")
                    .filter(|status| !status.is_empty())
                    .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
                influences: array_field(&map, "influences"),
                content: raw,
                project_id,
                repo_id,
                org_id,
                // raw payloads cannot carry an explicit identity override
                assertion_id: String::new(),
                parent_revision_id: String::new(),
            }
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn array_field(map: &Map<String, Value>, key: &str) -> Vec<Value> {
    map.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

// =============================================================================
// TESTS
// =============================================================================
