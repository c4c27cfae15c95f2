// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::default_config_path;
use crate::types::LogLevel;

/// Command-line arguments for `sysconfig`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sysconfig",
    version,
    about = "Load a daemon's <system> section, apply it to a supervisor and dump the result.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `sysconfig.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Temporarily override a system parameter, e.g. `--set log_level=debug`.
    ///
    /// May be repeated. The loaded `<system>` values plus these overrides
    /// are installed as a global override scope; the baseline itself is not
    /// changed. A `log_level` given here also sets the process log level.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// Logging level (trace, debug, info, warn, error, fatal).
    ///
    /// If omitted, the `<system>` log_level, `SYSCONFIG_LOG` or a default
    /// level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the `<system>` section, but don't apply it.
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
