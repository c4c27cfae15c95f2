// src/scope/local.rs

//! Per-caller configuration access.
//!
//! Components that need to read system settings hold a
//! [`SystemConfigContext`] (the engine's baseline plus the override slot)
//! and wrap it in their own [`SystemConfigView`]. A view resolves in this
//! order:
//!
//! 1. its own local override, once one has been created,
//! 2. the active global override,
//! 3. the engine's baseline.

use std::sync::Arc;

use tracing::debug;

use crate::config::SystemConfig;
use crate::errors::Result;
use crate::scope::global::GlobalSystemConfig;

/// Shared handle to the engine baseline and the global override slot.
#[derive(Debug, Clone)]
pub struct SystemConfigContext {
    baseline: Arc<SystemConfig>,
    global: Arc<GlobalSystemConfig>,
}

impl SystemConfigContext {
    /// Context over the process-wide override slot.
    pub fn new(baseline: SystemConfig) -> Self {
        Self::with_global(baseline, GlobalSystemConfig::process())
    }

    pub fn with_global(baseline: SystemConfig, global: Arc<GlobalSystemConfig>) -> Self {
        Self {
            baseline: Arc::new(baseline),
            global,
        }
    }

    pub fn baseline(&self) -> &Arc<SystemConfig> {
        &self.baseline
    }

    pub fn global(&self) -> &Arc<GlobalSystemConfig> {
        &self.global
    }

    /// Global override if one is active, else the baseline.
    pub fn effective(&self) -> Arc<SystemConfig> {
        self.global
            .current()
            .unwrap_or_else(|| self.baseline.clone())
    }

    /// A fresh view with no local override.
    pub fn view(&self) -> SystemConfigView {
        SystemConfigView::new(self.clone())
    }
}

/// One caller's view of the system config.
///
/// Starts without a local override. The first call to
/// [`system_config_override`](Self::system_config_override) snapshots the
/// currently effective config; from then on the view only ever returns its
/// own copy.
#[derive(Debug, Clone)]
pub struct SystemConfigView {
    context: SystemConfigContext,
    local: Option<Arc<SystemConfig>>,
}

impl SystemConfigView {
    pub fn new(context: SystemConfigContext) -> Self {
        Self {
            context,
            local: None,
        }
    }

    pub fn has_local_override(&self) -> bool {
        self.local.is_some()
    }

    /// The config this caller should use right now.
    pub fn system_config(&self) -> Arc<SystemConfig> {
        match &self.local {
            Some(local) => local.clone(),
            None => self.context.effective(),
        }
    }

    /// Set raw `key = value` pairs on this caller's local copy.
    ///
    /// Values are coerced like in a `<system>` section, but unknown keys are
    /// an error here since they cannot be assigned. Either every pair is
    /// applied or, on error, the local copy is left as it was.
    pub fn system_config_override<K, V, I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.system_config_override_with(|cfg| {
            for (key, value) in pairs {
                cfg.set_raw(key.as_ref(), value.as_ref())?;
            }
            Ok(())
        })
    }

    /// Edit this caller's local copy in place.
    pub fn system_config_override_with<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut SystemConfig) -> Result<()>,
    {
        let mut local = match &self.local {
            Some(local) => local.as_ref().clone(),
            None => {
                debug!("creating caller-local system config override");
                self.context.effective().as_ref().clone()
            }
        };
        edit(&mut local)?;
        self.local = Some(Arc::new(local));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;

    fn context() -> SystemConfigContext {
        let baseline = SystemConfig::from_pairs([("log_level", "info"), ("root_dir", "/base")])
            .unwrap();
        SystemConfigContext::with_global(baseline, Arc::new(GlobalSystemConfig::new()))
    }

    #[test]
    fn resolves_to_baseline_without_overrides() {
        let ctx = context();
        let view = ctx.view();
        assert!(!view.has_local_override());
        assert_eq!(view.system_config().root_dir.as_deref(), Some("/base"));
    }

    #[test]
    fn first_override_snapshots_global_override() {
        let ctx = context();
        let mut view = ctx.view();

        ctx.global()
            .with_override([("log_level", "error")], || {
                view.system_config_override([("root_dir", "/mine")]).unwrap();
            })
            .unwrap();

        let cfg = view.system_config();
        assert_eq!(cfg.log_level, Some(LogLevel::Error));
        assert_eq!(cfg.root_dir.as_deref(), Some("/mine"));
    }

    #[test]
    fn failed_override_keeps_previous_state() {
        let ctx = context();
        let mut view = ctx.view();

        let err = view.system_config_override([("root_dir", "/x"), ("log_level", "loud")]);
        assert!(err.is_err());
        assert!(!view.has_local_override());
        assert_eq!(view.system_config().root_dir.as_deref(), Some("/base"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let ctx = context();
        let mut view = ctx.view();
        assert!(view.system_config_override([("workers", "2")]).is_err());
    }
}
