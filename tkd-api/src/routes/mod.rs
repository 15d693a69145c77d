//! HTTP Routes
//!
//! Route handlers for the TKD mock service, plus the router factory that
//! wires them to the shared state. Any path or method combination not
//! registered here answers 404 `{"error":"not_found"}`, including wrong
//! methods on known paths.

pub mod assertion;
pub mod event;
pub mod health;
pub mod promotion;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Assemble the full API router.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz).fallback(route_not_found))
        .route(
            "/v1/knowledge/assertions/current",
            get(assertion::list_current).fallback(route_not_found),
        )
        .route(
            "/v1/knowledge/assertions",
            get(assertion::list_current)
                .post(assertion::submit)
                .fallback(route_not_found),
        )
        .route(
            "/v1/knowledge/assertions/:assertion_id/timeline",
            get(assertion::timeline).fallback(route_not_found),
        )
        .route(
            "/v1/agents/events",
            post(event::submit).fallback(route_not_found),
        )
        .route(
            "/v1/knowledge/promotions",
            post(promotion::submit).fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unknown path or method combination.
async fn route_not_found() -> ApiError {
    ApiError::not_found()
}
