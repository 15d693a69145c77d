//! Configuration for the TKD mock server
//!
//! Plain CLI flags with environment-variable fallback and documented
//! defaults, parsed with clap.

use clap::Parser;
use std::path::PathBuf;

/// Run a local TKD mock server.
#[derive(Parser, Debug, Clone)]
#[command(name = "tkd-mock")]
#[command(about = "Local mock of the TKD knowledge/provenance service")]
pub struct Args {
    /// Bind host
    #[arg(long, env = "TKD_MOCK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Bind port
    #[arg(long, env = "TKD_MOCK_PORT", default_value = "8787")]
    pub port: u16,

    /// JSONL file to append incoming requests
    #[arg(
        long,
        env = "TKD_MOCK_LOG_FILE",
        default_value = "/tmp/tkd-mock-events.jsonl"
    )]
    pub log_file: PathBuf,

    /// State snapshot for assertions/revisions/events/promotions
    #[arg(
        long,
        env = "TKD_MOCK_STATE_FILE",
        default_value = "/tmp/tkd-mock-state.json"
    )]
    pub state_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TKD_MOCK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Bind address as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================
