//! Configuration module for sbom-prep.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.sbom-prep.yaml` file in your project root or `~/.config/sbom-prep/`:
//!
//! ```yaml
//! licenses:
//!   custom:
//!     - id: LicenseRef-Nordic-5-Clause
//!       name: Nordic 5-Clause License
//! output:
//!   pretty: false
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, CONFIG_DIR_NAME, DEFAULT_PRETTY_OUTPUT};
pub use types::{AppConfig, AppConfigBuilder, CustomLicense, LicensesConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate `.sbom-prep.yaml` files.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
