//! Licenses command handler.
//!
//! Prints the normalized license catalog in presentation order.

use super::normalize::normalize_file;
use crate::config::AppConfig;
use crate::model::Data;
use crate::pipeline::{write_output, LicenseBucket, OutputTarget};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

const NO_LICENSE_LABEL: &str = "<no license>";

/// One catalog entry in presentation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseListing {
    pub key: String,
    pub friendly_id: String,
    pub bucket: LicenseBucket,
    /// Files whose expression is this key
    pub files: usize,
}

/// Catalog entries of a normalized snapshot in `licenses_sorted` order
#[must_use]
pub fn license_listing(data: &Data) -> Vec<LicenseListing> {
    let mut files_per_expr: HashMap<&str, usize> = HashMap::new();
    for file in &data.files {
        *files_per_expr.entry(file.license_expr.as_str()).or_default() += 1;
    }

    data.licenses_sorted
        .iter()
        .filter_map(|key| {
            let entry = data.licenses.get(key)?;
            Some(LicenseListing {
                key: key.clone(),
                friendly_id: entry.friendly_id().to_string(),
                bucket: LicenseBucket::of(key, entry),
                files: files_per_expr.get(key.as_str()).copied().unwrap_or(0),
            })
        })
        .collect()
}

fn render_table(listing: &[LicenseListing]) -> String {
    let mut out = String::new();
    for item in listing {
        let label = if item.key.is_empty() {
            NO_LICENSE_LABEL
        } else {
            item.friendly_id.as_str()
        };
        let _ = writeln!(out, "{:<20} {:>5}  {label}", item.bucket.name(), item.files);
    }
    out.truncate(out.trim_end().len());
    out
}

/// Run the licenses command
pub fn run_licenses(input: &Path, config: &AppConfig, json: bool, quiet: bool) -> Result<()> {
    let (data, _) = normalize_file(input, config)?;
    let listing = license_listing(&data);

    let content = if json {
        serde_json::to_string_pretty(&listing)?
    } else {
        render_table(&listing)
    };
    write_output(&content, &OutputTarget::from_option(config.output.file.clone()), quiet)
}
