// src/config/apply.rs

//! Copying set `<system>` values onto a live supervisor.

use tracing::debug;

use crate::config::schema::SYSTEM_CONFIG_PARAMETERS;
use crate::config::system::SystemConfig;
use crate::types::ParamValue;

/// Schema names whose supervisor field is named differently.
///
/// A parameter missing from this table is written to the field of the same
/// name. `log_level` fans out to both the logger and the supervisor.
pub const TARGET_FIELD_RENAMES: &[(&str, &[&str])] = &[
    ("log_level", &["log.level", "log_level"]),
    ("emit_error_log_interval", &["suppress_interval"]),
];

/// Supervisor fields written for a schema parameter.
pub fn target_fields(param: &'static str) -> Vec<&'static str> {
    TARGET_FIELD_RENAMES
        .iter()
        .find(|(name, _)| *name == param)
        .map(|(_, fields)| fields.to_vec())
        .unwrap_or_else(|| vec![param])
}

/// Something the applier can write into.
///
/// `field` is one of the supervisor field names produced by
/// [`target_fields`]. `value` always has the kind the schema declares for
/// the parameter that maps to `field`.
pub trait SupervisorTarget {
    fn assign(&mut self, field: &str, value: ParamValue);
}

impl SystemConfig {
    /// Write every set parameter onto `target`, in schema order.
    ///
    /// Unset parameters leave the target's own value alone.
    pub fn apply<T: SupervisorTarget + ?Sized>(&self, target: &mut T) {
        for spec in SYSTEM_CONFIG_PARAMETERS.iter() {
            let Some(value) = self.get(spec.name) else {
                continue;
            };
            for field in target_fields(spec.name) {
                debug!(param = spec.name, field, %value, "applying system config");
                target.assign(field, value.clone());
            }
        }
    }
}
