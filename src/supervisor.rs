// src/supervisor.rs

//! The supervisor-side fields that `<system>` settings land in.

use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::config::SupervisorTarget;
use crate::types::{LogLevel, ParamValue};

/// Logger state owned by the supervisor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoggerSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
}

impl LoggerSettings {
    /// Numeric level as stored by the logging subsystem.
    pub fn level_number(&self) -> Option<u8> {
        self.level.map(LogLevel::as_number)
    }
}

/// Supervisor state mutated by [`SystemConfig::apply`](crate::config::SystemConfig::apply).
///
/// `workers` is not a system config parameter; it is here so tests can
/// check that applying leaves unrelated state alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supervisor {
    pub workers: usize,
    pub log: LoggerSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_secs"
    )]
    pub suppress_interval: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_config_dump: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_repeated_stacktrace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub without_source: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_get_dump: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_permission: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir_permission: Option<u32>,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self {
            workers: 1,
            log: LoggerSettings::default(),
            root_dir: None,
            log_level: None,
            suppress_interval: None,
            suppress_config_dump: None,
            suppress_repeated_stacktrace: None,
            without_source: None,
            rpc_endpoint: None,
            enable_get_dump: None,
            process_name: None,
            file_permission: None,
            dir_permission: None,
        }
    }
}

impl SupervisorTarget for Supervisor {
    fn assign(&mut self, field: &str, value: ParamValue) {
        match (field, value) {
            ("log.level", ParamValue::Level(v)) => self.log.level = Some(v),
            ("log_level", ParamValue::Level(v)) => self.log_level = Some(v),
            ("suppress_interval", ParamValue::Time(v)) => self.suppress_interval = Some(v),
            ("root_dir", ParamValue::Str(v)) => self.root_dir = Some(v),
            ("suppress_config_dump", ParamValue::Bool(v)) => self.suppress_config_dump = Some(v),
            ("suppress_repeated_stacktrace", ParamValue::Bool(v)) => {
                self.suppress_repeated_stacktrace = Some(v)
            }
            ("without_source", ParamValue::Bool(v)) => self.without_source = Some(v),
            ("rpc_endpoint", ParamValue::Str(v)) => self.rpc_endpoint = Some(v),
            ("enable_get_dump", ParamValue::Bool(v)) => self.enable_get_dump = Some(v),
            ("process_name", ParamValue::Str(v)) => self.process_name = Some(v),
            ("file_permission", ParamValue::Permission(v)) => self.file_permission = Some(v),
            ("dir_permission", ParamValue::Permission(v)) => self.dir_permission = Some(v),
            // Unreachable for a config built through the schema.
            (field, value) => warn!(field, %value, "supervisor has no matching field; ignoring"),
        }
    }
}

fn serialize_secs<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(d) => serializer.serialize_f64(d.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SYSTEM_CONFIG_PARAMETERS, SystemConfig, target_fields};
    use crate::types::ParamKind;

    fn sample_raw(kind: ParamKind) -> &'static str {
        match kind {
            ParamKind::String => "sample",
            ParamKind::Bool => "false",
            ParamKind::Time => "90s",
            ParamKind::Level => "error",
            ParamKind::Permission => "0640",
        }
    }

    /// Every schema entry must round-trip through the settings object and
    /// land on a supervisor field, so the match arms cannot drift from the
    /// parameter table.
    #[test]
    fn every_schema_parameter_reaches_the_supervisor() {
        for spec in SYSTEM_CONFIG_PARAMETERS.iter() {
            let mut cfg = SystemConfig::blank();
            cfg.set_raw(spec.name, sample_raw(spec.kind)).unwrap();

            let value = cfg.get(spec.name).unwrap_or_else(|| panic!("{} unset", spec.name));
            assert_eq!(value.kind(), spec.kind, "{}", spec.name);
            assert_eq!(cfg.iter_set().count(), 1, "{}", spec.name);

            let mut sup = Supervisor::default();
            cfg.apply(&mut sup);
            assert_ne!(sup, Supervisor::default(), "{} was not applied", spec.name);

            // Each target field on its own must be accepted.
            for field in target_fields(spec.name) {
                let mut single = Supervisor::default();
                single.assign(field, value.clone());
                assert_ne!(single, Supervisor::default(), "{field} has no supervisor arm");
            }
        }
    }

    #[test]
    fn blank_config_leaves_defaults() {
        let mut sup = Supervisor::default();
        SystemConfig::blank().apply(&mut sup);
        assert_eq!(sup, Supervisor::default());
    }

    #[test]
    fn log_level_reaches_logger_and_supervisor() {
        let cfg = SystemConfig::from_pairs([("log_level", "warn")]).unwrap();
        let mut sup = Supervisor::default();
        cfg.apply(&mut sup);

        assert_eq!(sup.log.level, Some(LogLevel::Warn));
        assert_eq!(sup.log.level_number(), Some(3));
        assert_eq!(sup.log_level, Some(LogLevel::Warn));
    }

    #[test]
    fn mismatched_value_is_ignored() {
        let mut sup = Supervisor::default();
        sup.assign("root_dir", ParamValue::Bool(true));
        sup.assign("workers", ParamValue::Permission(4));
        assert_eq!(sup, Supervisor::default());
    }
}
