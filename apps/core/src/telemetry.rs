//! Tracing subscriber setup.
//!
//! Filter comes from `RUST_LOG` (default `info`). Output goes to stderr so
//! that `--json` results on stdout stay machine-readable.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::LogFormat;
use crate::error::{AuditError, AuditResult};

const APP_NAME: &str = "callaudit";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(format: LogFormat) -> AuditResult<()> {
    match format {
        LogFormat::Json => {
            let subscriber = Registry::default()
                .with(env_filter())
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stderr));
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| AuditError::Config(format!("tracing init failed: {}", e)))
        }
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| AuditError::Config(format!("tracing init failed: {}", e))),
    }
}
