// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `log_level` from the `<system>` section (if set)
//! 3. `SYSCONFIG_LOG` environment variable (e.g. "info", "debug")
//! 4. default to `info`
//!
//! Logs are sent to STDERR so stdout carries only the config dump.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::types::LogLevel;

pub const LOG_ENV_VAR: &str = "SYSCONFIG_LOG";

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, configured: Option<LogLevel>) -> Result<()> {
    let level = resolve_level(cli_level, configured, std::env::var(LOG_ENV_VAR).ok().as_deref());

    fmt()
        .with_max_level(level.to_tracing_level())
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    Ok(())
}

/// Pick the effective level; an unparsable env value is ignored.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    configured: Option<LogLevel>,
    env_value: Option<&str>,
) -> LogLevel {
    cli_level
        .or(configured)
        .or_else(|| env_value.and_then(|s| s.parse().ok()))
        .unwrap_or_default()
}
