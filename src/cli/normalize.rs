//! Normalize command handler.
//!
//! Implements the `normalize` subcommand: read a scanner snapshot, run the
//! pipeline and write the normalized snapshot.

use crate::config::{AppConfig, Validatable};
use crate::error::PrepError;
use crate::model::Data;
use crate::pipeline::{
    load_snapshot, snapshot_to_json, write_output, Normalizer, OutputTarget, PreProcessStats,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Inputs of the `normalize` subcommand
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Scanner snapshot to normalize
    pub input: PathBuf,
    /// Effective configuration (file merged with CLI overrides)
    pub app: AppConfig,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Load and normalize a snapshot using the configured custom licenses
pub fn normalize_file(input: &Path, config: &AppConfig) -> Result<(Data, PreProcessStats)> {
    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(PrepError::config(details.join("; ")).into());
    }

    let mut data = load_snapshot(input)
        .with_context(|| format!("Failed to read snapshot: {}", input.display()))?;
    let stats = Normalizer::from_config(&config.licenses)
        .run(&mut data)
        .with_context(|| format!("Failed to normalize snapshot: {}", input.display()))?;
    Ok((data, stats))
}

/// Run the normalize command
pub fn run_normalize(config: &NormalizeConfig) -> Result<PreProcessStats> {
    if !config.quiet {
        tracing::info!("Normalizing snapshot: {}", config.input.display());
    }

    let (data, stats) = normalize_file(&config.input, &config.app)?;
    let json = snapshot_to_json(&data, config.app.output.pretty)?;
    let target = OutputTarget::from_option(config.app.output.file.clone());
    write_output(&json, &target, config.quiet)?;

    Ok(stats)
}
