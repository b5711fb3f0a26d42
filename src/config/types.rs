//! Configuration types for sbom-prep.

use crate::model::License;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments override file settings via [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// License registry configuration
    pub licenses: LicensesConfig,
    /// Output configuration
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Add a custom license definition
    pub fn custom_license(mut self, license: CustomLicense) -> Self {
        self.config.licenses.custom.push(license);
        self
    }

    /// Set pretty-printed output
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.config.output.pretty = pretty;
        self
    }

    /// Set output file
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// License Configuration
// ============================================================================

/// Licenses known in addition to the SPDX license list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LicensesConfig {
    /// Custom license definitions, typically `LicenseRef-` licenses
    pub custom: Vec<CustomLicense>,
}

impl LicensesConfig {
    /// Catalog entries for the configured custom licenses
    pub fn to_licenses(&self) -> impl Iterator<Item = License> + '_ {
        self.custom.iter().map(CustomLicense::to_license)
    }
}

/// A custom license definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomLicense {
    /// Identifier used in license expressions
    pub id: String,
    /// Display identifier (defaults to `id`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_id: Option<String>,
    /// Full license name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// License text URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CustomLicense {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn to_license(&self) -> License {
        License {
            id: self.id.clone(),
            friendly_id: self.friendly_id.clone().unwrap_or_else(|| self.id.clone()),
            name: self.name.clone(),
            url: self.url.clone(),
            custom: true,
        }
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: super::defaults::DEFAULT_PRETTY_OUTPUT,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_license_defaults_friendly_id() {
        let license = CustomLicense::new("LicenseRef-Nordic-5-Clause").to_license();
        assert_eq!(license.friendly_id, "LicenseRef-Nordic-5-Clause");
        assert!(license.custom);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .custom_license(CustomLicense::new("LicenseRef-A"))
            .pretty(false)
            .output_file(Some(PathBuf::from("out.json")))
            .build();

        assert_eq!(config.licenses.custom.len(), 1);
        assert!(!config.output.pretty);
        assert_eq!(config.output.file, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml_ng::from_str("licenses:\n  custom:\n    - id: ACME\n").unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.licenses.custom, vec![CustomLicense::new("ACME")]);
    }
}
