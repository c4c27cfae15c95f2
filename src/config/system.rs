// src/config/system.rs

use std::fmt;
use std::time::Duration;

use crate::config::schema::{self, SYSTEM_CONFIG_PARAMETERS};
use crate::errors::{Result, SysConfigError};
use crate::types::{LogLevel, ParamValue};

/// Typed `<system>` settings.
///
/// Each field is `None` ("unset") unless the source section supplied it, so
/// `Some(false)` and `Some(0)` are real values and never confused with
/// "not configured". `Clone` is a deep copy; see [`SystemConfig::duplicate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemConfig {
    pub root_dir: Option<String>,
    pub log_level: Option<LogLevel>,
    pub suppress_repeated_stacktrace: Option<bool>,
    pub emit_error_log_interval: Option<Duration>,
    pub suppress_config_dump: Option<bool>,
    pub without_source: Option<bool>,
    pub rpc_endpoint: Option<String>,
    pub enable_get_dump: Option<bool>,
    pub process_name: Option<String>,
    pub file_permission: Option<u32>,
    pub dir_permission: Option<u32>,
}

impl SystemConfig {
    /// A config with every parameter unset.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.iter_set().next().is_none()
    }

    /// Independent copy of every field.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Value of a parameter by schema name; `None` when unset or unknown.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        match name {
            "root_dir" => self.root_dir.clone().map(ParamValue::Str),
            "log_level" => self.log_level.map(ParamValue::Level),
            "suppress_repeated_stacktrace" => {
                self.suppress_repeated_stacktrace.map(ParamValue::Bool)
            }
            "emit_error_log_interval" => self.emit_error_log_interval.map(ParamValue::Time),
            "suppress_config_dump" => self.suppress_config_dump.map(ParamValue::Bool),
            "without_source" => self.without_source.map(ParamValue::Bool),
            "rpc_endpoint" => self.rpc_endpoint.clone().map(ParamValue::Str),
            "enable_get_dump" => self.enable_get_dump.map(ParamValue::Bool),
            "process_name" => self.process_name.clone().map(ParamValue::Str),
            "file_permission" => self.file_permission.map(ParamValue::Permission),
            "dir_permission" => self.dir_permission.map(ParamValue::Permission),
            _ => None,
        }
    }

    /// Store an already-typed value.
    ///
    /// Fails on names outside the schema and on values whose kind does not
    /// match the parameter's declared kind.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let spec = schema::lookup(name)
            .ok_or_else(|| SysConfigError::UnknownParameter(name.to_string()))?;
        let mismatch = |value: &ParamValue| {
            SysConfigError::invalid(
                name,
                &value.to_string(),
                format!("expected a {} value, got {}", spec.kind, value.kind()),
            )
        };

        match (name, value) {
            ("root_dir", ParamValue::Str(v)) => self.root_dir = Some(v),
            ("log_level", ParamValue::Level(v)) => self.log_level = Some(v),
            ("suppress_repeated_stacktrace", ParamValue::Bool(v)) => {
                self.suppress_repeated_stacktrace = Some(v)
            }
            ("emit_error_log_interval", ParamValue::Time(v)) => {
                self.emit_error_log_interval = Some(v)
            }
            ("suppress_config_dump", ParamValue::Bool(v)) => self.suppress_config_dump = Some(v),
            ("without_source", ParamValue::Bool(v)) => self.without_source = Some(v),
            ("rpc_endpoint", ParamValue::Str(v)) => self.rpc_endpoint = Some(v),
            ("enable_get_dump", ParamValue::Bool(v)) => self.enable_get_dump = Some(v),
            ("process_name", ParamValue::Str(v)) => self.process_name = Some(v),
            ("file_permission", ParamValue::Permission(v)) => self.file_permission = Some(v),
            ("dir_permission", ParamValue::Permission(v)) => self.dir_permission = Some(v),
            (_, other) => return Err(mismatch(&other)),
        }
        Ok(())
    }

    /// Coerce a raw value through the schema and store it.
    pub fn set_raw(&mut self, name: &str, raw: &str) -> Result<()> {
        let spec = schema::lookup(name)
            .ok_or_else(|| SysConfigError::UnknownParameter(name.to_string()))?;
        let value = (spec.coerce)(raw).map_err(|reason| SysConfigError::invalid(name, raw, reason))?;
        self.set(name, value)
    }

    /// Set parameters in schema order.
    pub fn iter_set(&self) -> impl Iterator<Item = (&'static str, ParamValue)> + '_ {
        SYSTEM_CONFIG_PARAMETERS
            .iter()
            .filter_map(|spec| self.get(spec.name).map(|v| (spec.name, v)))
    }
}

/// One `name = value` line per set parameter, in schema order.
impl fmt::Display for SystemConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter_set() {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}
