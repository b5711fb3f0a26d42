//! Configuration validation for sbom-prep.

use super::types::{AppConfig, CustomLicense, LicensesConfig, OutputConfig};
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.licenses.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for LicensesConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (index, license) in self.custom.iter().enumerate() {
            let field = format!("licenses.custom[{index}].id");
            errors.extend(
                license
                    .validate()
                    .into_iter()
                    .map(|e| ConfigError::new(field.clone(), e.message)),
            );
            if !license.id.is_empty() && !seen.insert(license.id.to_ascii_uppercase()) {
                errors.push(ConfigError::new(
                    field,
                    format!("Duplicate custom license '{}'", license.id),
                ));
            }
        }

        errors
    }
}

impl Validatable for CustomLicense {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.id.is_empty() {
            errors.push(ConfigError::new("id", "License id must not be empty"));
        } else if self
            .id
            .chars()
            .any(|c| c.is_whitespace() || c == '(' || c == ')')
        {
            errors.push(ConfigError::new(
                "id",
                format!(
                    "License id '{}' must not contain whitespace or parentheses",
                    self.id
                ),
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}
