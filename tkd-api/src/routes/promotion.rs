//! Promotion Routes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tkd_core::random_id;

use crate::error::ApiResult;
use crate::extractors::RawJson;
use crate::state::AppState;
use crate::types::PromotionAccepted;

pub const SUBMIT_PATH: &str = "/v1/knowledge/promotions";

/// POST /v1/knowledge/promotions - capture a promotion submission, verbatim.
pub async fn submit(
    State(state): State<AppState>,
    RawJson(body): RawJson,
) -> ApiResult<impl IntoResponse> {
    let request_id = random_id("req");
    state.audit.append(SUBMIT_PATH, &body, &request_id);

    let promotion_id = state.store.record_promotion(body, &request_id)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(PromotionAccepted {
            accepted: true,
            request_id,
            path: SUBMIT_PATH.to_string(),
            promotion_id,
        }),
    ))
}
