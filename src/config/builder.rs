// src/config/builder.rs

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::element::Element;
use crate::config::schema::SYSTEM_CONFIG_PARAMETERS;
use crate::config::system::SystemConfig;
use crate::errors::{Result, SysConfigError};

/// Name of the configuration section this crate owns.
pub const SYSTEM_SECTION: &str = "system";

impl SystemConfig {
    /// Build from a parsed configuration tree.
    ///
    /// Looks at the root's direct children named `system`:
    /// - none: blank config,
    /// - one: built from that section,
    /// - more than one: [`SysConfigError::DuplicatedSection`].
    pub fn create(root: &Element) -> Result<Self> {
        let mut systems = root.elements_named(SYSTEM_SECTION);
        let first = systems.next();
        if systems.next().is_some() {
            return Err(SysConfigError::DuplicatedSection(SYSTEM_SECTION.to_string()));
        }
        Self::from_section(first)
    }

    /// Build from a single section; `None` is treated as an empty section.
    pub fn from_section(section: Option<&Element>) -> Result<Self> {
        match section {
            Some(section) => Self::from_lookup(|key| section.get(key)),
            None => Ok(Self::blank()),
        }
    }

    /// Build from a flat key/value mapping, bypassing the section lookup.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let map: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Self::from_lookup(|key| map.get(key).map(String::as_str))
    }

    /// Keys the schema does not know are never asked for, which is how
    /// unknown keys end up ignored.
    fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Result<Self> {
        let mut cfg = Self::blank();
        for spec in SYSTEM_CONFIG_PARAMETERS.iter() {
            if let Some(raw) = lookup(spec.name) {
                let value = (spec.coerce)(raw)
                    .map_err(|reason| SysConfigError::invalid(spec.name, raw, reason))?;
                cfg.set(spec.name, value)?;
            }
        }
        debug!(set = cfg.iter_set().count(), "built system config");
        Ok(cfg)
    }
}

/// Anything that can become a [`SystemConfig`].
///
/// Lets override entry points accept either a ready config or raw input.
pub trait IntoSystemConfig {
    fn into_system_config(self) -> Result<SystemConfig>;
}

impl IntoSystemConfig for SystemConfig {
    fn into_system_config(self) -> Result<SystemConfig> {
        Ok(self)
    }
}

impl IntoSystemConfig for &SystemConfig {
    fn into_system_config(self) -> Result<SystemConfig> {
        Ok(self.duplicate())
    }
}

/// The element itself is the section.
impl IntoSystemConfig for &Element {
    fn into_system_config(self) -> Result<SystemConfig> {
        SystemConfig::from_section(Some(self))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoSystemConfig for BTreeMap<K, V> {
    fn into_system_config(self) -> Result<SystemConfig> {
        SystemConfig::from_pairs(self)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, S> IntoSystemConfig for HashMap<K, V, S> {
    fn into_system_config(self) -> Result<SystemConfig> {
        SystemConfig::from_pairs(self)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoSystemConfig for Vec<(K, V)> {
    fn into_system_config(self) -> Result<SystemConfig> {
        SystemConfig::from_pairs(self)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> IntoSystemConfig for [(K, V); N] {
    fn into_system_config(self) -> Result<SystemConfig> {
        SystemConfig::from_pairs(self)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoSystemConfig for &[(K, V)] {
    fn into_system_config(self) -> Result<SystemConfig> {
        SystemConfig::from_pairs(self.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
    }
}
