// src/scope/global.rs

//! Process-wide default [`SystemConfig`] with dynamically scoped overrides.
//!
//! The slot holds at most one config at a time. [`GlobalSystemConfig::with_override`]
//! saves whatever is there, installs a new config, runs a callback and puts
//! the saved value back on every exit path, including unwinding.
//!
//! The slot is shared by everything in the process. Scopes entered from
//! independent threads at the same time interleave: whichever scope exits
//! last decides what is restored. Nesting on a single thread of control is
//! the supported pattern.

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::trace;

use crate::config::{IntoSystemConfig, SystemConfig};
use crate::errors::Result;

static PROCESS_SYSTEM_CONFIG: LazyLock<Arc<GlobalSystemConfig>> =
    LazyLock::new(|| Arc::new(GlobalSystemConfig::new()));

/// A single overridable slot. Starts empty.
#[derive(Debug, Default)]
pub struct GlobalSystemConfig {
    current: RwLock<Option<Arc<SystemConfig>>>,
}

impl GlobalSystemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot shared by the whole process.
    pub fn process() -> Arc<GlobalSystemConfig> {
        PROCESS_SYSTEM_CONFIG.clone()
    }

    /// The active override, if any scope is entered.
    pub fn current(&self) -> Option<Arc<SystemConfig>> {
        self.current.read().clone()
    }

    /// Install `config` until the returned guard is dropped.
    pub fn enter(&self, config: SystemConfig) -> OverrideGuard<'_> {
        let config = Arc::new(config);
        let saved = std::mem::replace(&mut *self.current.write(), Some(config));
        trace!(restoring_override = saved.is_some(), "entered system config override");
        OverrideGuard { slot: self, saved }
    }

    /// Run `body` with `config` as the active override.
    ///
    /// Building the config from raw input is the only fallible step; it
    /// happens before the slot is touched.
    pub fn with_override<C, F, R>(&self, config: C, body: F) -> Result<R>
    where
        C: IntoSystemConfig,
        F: FnOnce() -> R,
    {
        let config = config.into_system_config()?;
        let _guard = self.enter(config);
        Ok(body())
    }
}

/// Restores the value a scope replaced.
#[must_use = "the override ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct OverrideGuard<'a> {
    slot: &'a GlobalSystemConfig,
    saved: Option<Arc<SystemConfig>>,
}

impl Drop for OverrideGuard<'_> {
    fn drop(&mut self) {
        *self.slot.current.write() = self.saved.take();
        trace!("left system config override");
    }
}

/// [`GlobalSystemConfig::with_override`] on the process-wide slot.
pub fn with_override<C, F, R>(config: C, body: F) -> Result<R>
where
    C: IntoSystemConfig,
    F: FnOnce() -> R,
{
    PROCESS_SYSTEM_CONFIG.with_override(config, body)
}

/// The process-wide active override, if any.
pub fn current_override() -> Option<Arc<SystemConfig>> {
    PROCESS_SYSTEM_CONFIG.current()
}
