//! `tracing` subscriber setup.
//!
//! Logs always go to stderr: stdout belongs to the MCP protocol stream.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set, otherwise `default_level`.
pub fn env_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| anyhow!("Invalid log level '{}': {}", default_level, e)),
    }
}

/// Install the global subscriber.
///
/// # Arguments
/// * `default_level` - Filter directive used when `RUST_LOG` is unset.
/// * `json` - Emit one JSON object per event instead of text.
pub fn init_tracing(default_level: &str, json: bool) -> Result<()> {
    let filter = env_filter(default_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.with_ansi(false).try_init()
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
