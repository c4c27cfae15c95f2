// src/config/schema.rs

//! The fixed, ordered set of `<system>` parameters.
//!
//! Order matters: it is the order in which the builder fills a
//! [`SystemConfig`](crate::config::SystemConfig) and the applier walks it.

use crate::config::coerce::{self, Coercion};
use crate::types::ParamKind;

/// One declared parameter. Every parameter defaults to unset.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub coerce: Coercion,
}

pub const SYSTEM_CONFIG_PARAMETERS: [ParamSpec; 11] = [
    param("root_dir", ParamKind::String, coerce::string),
    param("log_level", ParamKind::Level, coerce::level),
    param("suppress_repeated_stacktrace", ParamKind::Bool, coerce::boolean),
    param("emit_error_log_interval", ParamKind::Time, coerce::time),
    param("suppress_config_dump", ParamKind::Bool, coerce::boolean),
    param("without_source", ParamKind::Bool, coerce::boolean),
    param("rpc_endpoint", ParamKind::String, coerce::string),
    param("enable_get_dump", ParamKind::Bool, coerce::boolean),
    param("process_name", ParamKind::String, coerce::string),
    param("file_permission", ParamKind::Permission, coerce::permission),
    param("dir_permission", ParamKind::Permission, coerce::permission),
];

const fn param(name: &'static str, kind: ParamKind, coerce: Coercion) -> ParamSpec {
    ParamSpec { name, kind, coerce }
}

pub fn lookup(name: &str) -> Option<&'static ParamSpec> {
    SYSTEM_CONFIG_PARAMETERS.iter().find(|p| p.name == name)
}
