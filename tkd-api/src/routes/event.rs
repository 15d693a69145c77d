//! Agent Event Routes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tkd_core::random_id;

use crate::error::ApiResult;
use crate::extractors::RawJson;
use crate::state::AppState;
use crate::types::EventAccepted;

pub const SUBMIT_PATH: &str = "/v1/agents/events";

/// POST /v1/agents/events - capture an arbitrary event envelope, verbatim.
pub async fn submit(
    State(state): State<AppState>,
    RawJson(body): RawJson,
) -> ApiResult<impl IntoResponse> {
    let request_id = random_id("req");
    state.audit.append(SUBMIT_PATH, &body, &request_id);

    state.store.record_event(body, &request_id)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(EventAccepted {
            accepted: true,
            request_id,
            path: SUBMIT_PATH.to_string(),
        }),
    ))
}
