// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use crate::config::builder::SYSTEM_SECTION;
use crate::config::element::Element;
use crate::config::schema;
use crate::config::system::SystemConfig;
use crate::errors::{Result, SysConfigError};
use crate::types::ParamKind;

/// Name given to the synthetic root element of a parsed document.
pub const ROOT_ELEMENT: &str = "ROOT";

/// Parse TOML text into a configuration element tree.
///
/// - `[system]` becomes one `system` child of the root.
/// - `[[system]]` becomes one `system` child per entry, so duplicated
///   sections survive parsing and are rejected later by the builder.
/// - Scalars are stored as their raw string form (`60` -> `"60"`).
/// - Permission parameters of a `system` section must be quoted octal
///   strings. A TOML integer such as `0o644` has already lost its base by
///   the time it is read, so it is rejected instead of being reinterpreted.
pub fn parse_str(text: &str) -> Result<Element> {
    let table: Table = text.parse()?;
    table_to_element(ROOT_ELEMENT, table)
}

/// Read and parse a TOML configuration file.
///
/// This only produces the element tree; no system config semantics are
/// applied. Use [`load_system_config`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Element> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    debug!(path = ?path, bytes = contents.len(), "read configuration file");
    parse_str(&contents)
}

/// Read a TOML file and build the [`SystemConfig`] from its `system` section.
///
/// A file without a `system` section yields a blank config.
pub fn load_system_config(path: impl AsRef<Path>) -> Result<SystemConfig> {
    let root = load_from_path(path)?;
    SystemConfig::create(&root)
}

/// Default config path used by the binary when `--config` is omitted.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("sysconfig.toml")
}

fn table_to_element(name: &str, table: Table) -> Result<Element> {
    let mut element = Element::new(name);
    for (key, value) in table {
        match value {
            Value::Table(child) => element.elements.push(table_to_element(&key, child)?),
            Value::Array(items) if is_array_of_tables(&items) => {
                for item in items {
                    if let Value::Table(child) = item {
                        element.elements.push(table_to_element(&key, child)?);
                    }
                }
            }
            Value::Integer(i) if name == SYSTEM_SECTION && is_permission(&key) => {
                return Err(SysConfigError::invalid(
                    &key,
                    &i.to_string(),
                    "permissions must be a quoted octal string, e.g. \"0644\"",
                ));
            }
            other => {
                element.attrs.insert(key, raw_string(other));
            }
        }
    }
    Ok(element)
}

fn is_permission(key: &str) -> bool {
    schema::lookup(key).is_some_and(|p| p.kind == ParamKind::Permission)
}

fn is_array_of_tables(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_table)
}

fn raw_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        other => other.to_string(),
    }
}
