//! Health Check Endpoint
//!
//! Reports liveness plus the sizes of the four store collections.
//! No authentication required.

use axum::{extract::State, Json};
use tkd_core::now_utc;

use crate::error::ApiResult;
use crate::state::{AppState, SERVICE_NAME};
use crate::types::HealthResponse;

/// GET /healthz - liveness plus collection counts.
pub async fn healthz(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let counts = state.store.counts()?;
    Ok(Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
        time: now_utc(),
        counts,
    }))
}
