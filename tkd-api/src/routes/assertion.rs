//! Assertion Routes
//!
//! Submission, current listing (with its alias), and per-assertion timeline.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tkd_core::{random_id, AssertionFilter};

use crate::error::ApiResult;
use crate::extractors::RawJson;
use crate::state::AppState;
use crate::types::{AssertionAccepted, CurrentRecord, ListAssertionsResponse, TimelineResponse};

pub const SUBMIT_PATH: &str = "/v1/knowledge/assertions";

/// GET /v1/knowledge/assertions/current (alias: /v1/knowledge/assertions)
pub async fn list_current(
    State(state): State<AppState>,
    Query(filter): Query<AssertionFilter>,
) -> ApiResult<Json<ListAssertionsResponse>> {
    let records: Vec<CurrentRecord> = state
        .store
        .current_records(&filter)?
        .into_iter()
        .map(|(assertion, current_revision)| CurrentRecord {
            assertion,
            current_revision,
        })
        .collect();

    Ok(Json(ListAssertionsResponse {
        count: records.len(),
        records,
    }))
}

/// GET /v1/knowledge/assertions/:assertion_id/timeline
pub async fn timeline(
    State(state): State<AppState>,
    Path(assertion_id): Path<String>,
) -> ApiResult<Json<TimelineResponse>> {
    let view = state.store.timeline(&assertion_id)?;
    Ok(Json(TimelineResponse {
        assertion: view.assertion,
        count: view.revisions.len(),
        revisions: view.revisions,
    }))
}

/// POST /v1/knowledge/assertions
pub async fn submit(
    State(state): State<AppState>,
    RawJson(body): RawJson,
) -> ApiResult<impl IntoResponse> {
    let request_id = random_id("req");
    state.audit.append(SUBMIT_PATH, &body, &request_id);

    let receipt = state.store.submit_assertion(body, &request_id)?;
    tracing::debug!(
        assertion_id = %receipt.assertion_id,
        revision_number = receipt.revision_number,
        "assertion accepted"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(AssertionAccepted {
            accepted: true,
            request_id,
            path: SUBMIT_PATH.to_string(),
            assertion_id: receipt.assertion_id,
            revision_id: receipt.revision_id,
            revision_number: receipt.revision_number,
            scope: receipt.scope,
            knowledge_key: receipt.knowledge_key,
        }),
    ))
}
