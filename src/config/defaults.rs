//! Default configurations and presets for sbom-prep.

use super::types::{AppConfig, OutputConfig};

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Pretty-printed output for people
    Default,
    /// Compact output for pipelines and diffs of generated artifacts
    CiCd,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "ci-cd" | "ci" | "cd" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Parse a preset, falling back to [`ConfigPreset::Default`] with a warning.
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown preset '{}', using 'default'. Valid options: default, ci-cd",
                name
            );
            Self::Default
        })
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::CiCd => Self {
                output: OutputConfig {
                    pretty: false,
                    ..OutputConfig::default()
                },
                ..Self::default()
            },
        }
    }
}

// ============================================================================
// Default Values
// ============================================================================

/// Snapshots are pretty-printed unless asked otherwise
pub const DEFAULT_PRETTY_OUTPUT: bool = true;

/// Directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "sbom-prep";
