// src/config/mod.rs

//! The `<system>` configuration section.
//!
//! Responsibilities:
//! - Describe the fixed parameter schema and its coercions (`schema.rs`, `coerce.rs`).
//! - Hold the typed settings (`system.rs`) and build them from a parsed
//!   configuration tree or a flat mapping (`builder.rs`).
//! - Copy set values onto a supervisor (`apply.rs`).
//! - Turn TOML text into the configuration tree (`loader.rs`, `element.rs`).

pub mod apply;
pub mod builder;
pub mod coerce;
pub mod element;
pub mod loader;
pub mod schema;
pub mod system;

pub use apply::{SupervisorTarget, TARGET_FIELD_RENAMES, target_fields};
pub use builder::{IntoSystemConfig, SYSTEM_SECTION};
pub use element::Element;
pub use loader::{load_from_path, load_system_config, parse_str};
pub use schema::{ParamSpec, SYSTEM_CONFIG_PARAMETERS};
pub use system::SystemConfig;
