// src/scope/mod.rs

//! Ways to temporarily change which [`SystemConfig`](crate::config::SystemConfig)
//! is in effect.
//!
//! - [`global`]: a process-wide slot with dynamically scoped, always-restored
//!   overrides.
//! - [`local`]: per-caller snapshots that shadow everything else once created.

pub mod global;
pub mod local;

pub use global::{GlobalSystemConfig, OverrideGuard, current_override, with_override};
pub use local::{SystemConfigContext, SystemConfigView};
