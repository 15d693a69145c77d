//! Best-effort JSONL audit logging of inbound submissions
//!
//! Every POST body is appended verbatim, with its request id and receive
//! time, to an append-only JSON-lines file. The log is write-only: nothing
//! in the service ever reads it back. A failed append is logged at WARN and
//! never fails the request.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tkd_core::now_utc;

/// Append-only request-audit log.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one request record.
    pub fn append(&self, request_path: &str, body: &Value, request_id: &str) {
        if let Err(err) = self.try_append(request_path, body, request_id) {
            tracing::warn!(
                error = %err,
                audit_log = %self.path.display(),
                "audit append failed"
            );
        }
    }

    fn try_append(&self, request_path: &str, body: &Value, request_id: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let record = json!({
            "received_at": now_utc(),
            "request_id": request_id,
            "path": request_path,
            "body": body,
        });
        let mut line = record.to_string();
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

// =============================================================================
// TESTS
// =============================================================================
