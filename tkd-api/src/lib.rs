//! TKD Mock API - HTTP Layer
//!
//! Axum REST surface over the guarded knowledge store: health, assertion
//! submission/listing/timeline, agent events, and promotions, plus the
//! best-effort request-audit log and the clap bootstrap configuration.

pub mod audit;
pub mod config;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use audit::AuditLog;
pub use config::Args;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use extractors::RawJson;
pub use routes::create_api_router;
pub use state::{AppState, SERVICE_NAME};
