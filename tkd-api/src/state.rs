//! Shared application state for Axum routers

use std::sync::Arc;

use tkd_storage::KnowledgeStore;

use crate::audit::AuditLog;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "tkd-mock";

/// Application-wide state shared across all routes.
///
/// Constructed once at startup and injected into every handler through the
/// router; nothing hangs off globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<KnowledgeStore>,
    pub audit: Arc<AuditLog>,
}

impl AppState {
    pub fn new(store: Arc<KnowledgeStore>, audit: Arc<AuditLog>) -> Self {
        Self { store, audit }
    }
}
