// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod scope;
pub mod supervisor;
pub mod types;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{SystemConfig, load_system_config};
use crate::scope::SystemConfigContext;
use crate::supervisor::Supervisor;
use crate::types::LogLevel;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - loading the `<system>` section
/// - logging, at the level that will actually be in effect
/// - [`execute`] against the process-wide override slot, writing to stdout
pub fn run(args: CliArgs) -> Result<()> {
    let system = load_system_config(&args.config)
        .with_context(|| format!("loading <system> section from {:?}", args.config))?;

    let level = startup_log_level(&system, &args.set)?;
    logging::init_logging(args.log_level, level)?;
    info!(path = ?args.config, "loaded system config");

    let context = SystemConfigContext::new(system);
    let stdout = std::io::stdout();
    execute(&args, &context, &mut stdout.lock())?;
    Ok(())
}

/// Apply the context's config to a fresh supervisor and dump the result.
///
/// - `--dry-run`: print the baseline and return `None` without applying.
/// - `--set`: the baseline plus the overrides is installed on the context's
///   global slot for the duration of the apply.
/// - nothing is written when the effective `suppress_config_dump` is true.
pub fn execute<W: Write>(
    args: &CliArgs,
    context: &SystemConfigContext,
    out: &mut W,
) -> Result<Option<Supervisor>> {
    if args.dry_run {
        writeln!(out, "sysconfig dry-run: {:?} is valid", args.config)?;
        write!(out, "{}", context.baseline())?;
        return Ok(None);
    }

    let (supervisor, effective) = match scoped_config(context.baseline(), &args.set)? {
        Some(scoped) => {
            debug!(overrides = args.set.len(), "entering override scope");
            context.global().with_override(scoped, || configure(context))?
        }
        None => configure(context),
    };

    if effective.suppress_config_dump == Some(true) {
        debug!("config dump suppressed");
    } else {
        print_dump(out, &supervisor, &effective)?;
    }
    Ok(Some(supervisor))
}

/// `log_level` as it will be seen inside the `--set` scope, if any.
fn startup_log_level(system: &SystemConfig, set: &[(String, String)]) -> Result<Option<LogLevel>> {
    Ok(scoped_config(system, set)?
        .as_ref()
        .unwrap_or(system)
        .log_level)
}

/// The config a `--set` scope installs: the baseline with the overrides on top.
fn scoped_config(baseline: &SystemConfig, set: &[(String, String)]) -> Result<Option<SystemConfig>> {
    if set.is_empty() {
        return Ok(None);
    }
    let mut scoped = baseline.duplicate();
    for (key, value) in set {
        scoped
            .set_raw(key, value)
            .with_context(|| format!("applying --set {key}={value}"))?;
    }
    Ok(Some(scoped))
}

/// Apply whatever a fresh caller would resolve right now.
fn configure(context: &SystemConfigContext) -> (Supervisor, SystemConfig) {
    let effective = context.view().system_config();
    let mut supervisor = Supervisor::default();
    effective.apply(&mut supervisor);
    (supervisor, effective.as_ref().clone())
}

fn print_dump<W: Write>(out: &mut W, supervisor: &Supervisor, effective: &SystemConfig) -> Result<()> {
    writeln!(out, "# effective <system>")?;
    write!(out, "{effective}")?;
    writeln!(out)?;
    writeln!(out, "# supervisor")?;
    let rendered = toml::to_string_pretty(supervisor).context("rendering supervisor state")?;
    write!(out, "{rendered}")?;
    Ok(())
}
