//! Inventory normalization pipeline.
//!
//! [`pre_process`] turns a scanner snapshot into a canonical, internally
//! consistent [`Data`] ready for document rendering. The passes run strictly
//! in order, each relying on the state the previous one left behind:
//!
//! 1. sort files by path,
//! 2. build one license expression per file,
//! 3. aggregate detectors,
//! 4. rebuild the license catalog,
//! 5. order catalog keys and packages, assign SPDX identifiers and
//!    normalize package display metadata,
//! 6. rebuild the DESCRIBES / CONTAINS relationships.
//!
//! Running the pipeline on its own output is safe: ordering and relationship
//! counts are preserved.

mod catalog;
mod expression;
mod files;
mod identifiers;
mod output;
mod relationships;
mod snapshot;

pub use catalog::build_catalog;
pub use expression::{build_license_expr, build_license_expressions};
pub use files::{collect_detectors, sort_files};
pub use identifiers::{
    assign_identifiers, normalize_packages, sort_keys, LicenseBucket, NONE_NAME, NONE_VERSION,
};
pub use output::{write_output, OutputTarget};
pub use relationships::derive_relationships;
pub use snapshot::{load_snapshot, read_snapshot, snapshot_to_json};

use crate::config::LicensesConfig;
use crate::error::{PrepError, Result};
use crate::license::{
    canonical_spdx_id, ExpressionResolver, LicenseRegistry, SpdxExpressionResolver,
    SpdxLicenseRegistry,
};
use crate::model::Data;
use serde::Serialize;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Counts describing a normalized snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreProcessStats {
    pub files: usize,
    pub packages: usize,
    /// Catalog entries, expressions included
    pub licenses: usize,
    /// Catalog entries flagged custom
    pub custom_licenses: usize,
    pub detectors: usize,
    pub relationships: usize,
}

impl PreProcessStats {
    #[must_use]
    pub fn of(data: &Data) -> Self {
        Self {
            files: data.files.len(),
            packages: data.packages.len(),
            licenses: data.licenses.len(),
            custom_licenses: data.licenses.values().filter(|e| e.is_custom()).count(),
            detectors: data.detectors.len(),
            relationships: data.relationships.len(),
        }
    }
}

/// Fail if any file references a package missing from `data.packages`
pub fn check_integrity(data: &Data) -> Result<()> {
    match data
        .files
        .iter()
        .find(|file| data.package_of(file).is_none())
    {
        Some(file) => Err(PrepError::unknown_package(&file.file_path, &file.package)),
        None => Ok(()),
    }
}

/// Normalize `data` in place.
///
/// Malformed license data never fails the run; the only error is a file
/// referencing an unknown package, detected before anything is modified.
pub fn pre_process(
    data: &mut Data,
    resolver: &dyn ExpressionResolver,
    registry: &dyn LicenseRegistry,
) -> Result<PreProcessStats> {
    check_integrity(data)?;

    sort_files(data);
    build_license_expressions(data, resolver);
    collect_detectors(data);
    build_catalog(data, resolver, registry);
    sort_keys(data);
    assign_identifiers(data);
    normalize_packages(&mut data.packages);
    derive_relationships(data);

    let stats = PreProcessStats::of(data);
    tracing::info!(
        files = stats.files,
        packages = stats.packages,
        licenses = stats.licenses,
        custom_licenses = stats.custom_licenses,
        relationships = stats.relationships,
        "Normalized inventory"
    );
    Ok(stats)
}

/// [`pre_process`] with the bundled SPDX list plus configured custom licenses
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    registry: SpdxLicenseRegistry,
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &LicensesConfig) -> Self {
        Self {
            registry: SpdxLicenseRegistry::with_custom(config.to_licenses()),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &SpdxLicenseRegistry {
        &self.registry
    }

    /// Run the pipeline.
    ///
    /// Identifiers the scanner already cataloged keep their spelling, in
    /// addition to the configured custom ids.
    pub fn run(&self, data: &mut Data) -> Result<PreProcessStats> {
        let scanned_ids = data
            .licenses
            .iter()
            .filter(|(key, entry)| !entry.is_expr() && canonical_spdx_id(key).is_none())
            .map(|(key, _)| key.as_str());
        let resolver =
            SpdxExpressionResolver::with_custom_ids(scanned_ids.chain(self.registry.custom_ids()));
        pre_process(data, &resolver, &self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomLicense;
    use crate::error::IntegrityErrorKind;
    use crate::model::{File, License, LicenseEntry, Package};

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn unknown_package_is_rejected_before_mutation() {
        let mut data = Data::new();
        data.add_package(Package::new("app"));
        data.add_file(File::new("b.c", "app", ["MIT"]));
        data.add_file(File::new("a.c", "ghost", ["MIT"]));

        let err = Normalizer::new().run(&mut data).unwrap_err();

        match err {
            PrepError::Integrity {
                source: IntegrityErrorKind::UnknownPackage { file, package },
                ..
            } => {
                assert_eq!(file, "a.c");
                assert_eq!(package, "ghost");
            }
            other => panic!("expected integrity error, got {other:?}"),
        }
        assert_eq!(data.files[0].file_path, "b.c");
        assert!(data.files[0].license_expr.is_empty());
    }

    #[test]
    fn stats_reflect_the_normalized_snapshot() {
        let mut data = Data::new();
        data.add_package(Package::new("app"));
        data.add_file(File::new("a.c", "app", ["MIT", "ACME"]).with_detector("spdx-tag"));

        let stats = Normalizer::new().run(&mut data).unwrap();

        assert_eq!(
            stats,
            PreProcessStats {
                files: 1,
                packages: 1,
                licenses: 3,
                custom_licenses: 2,
                detectors: 1,
                relationships: 2,
            }
        );
    }

    #[test]
    fn configured_custom_license_keeps_its_spelling() {
        let mut custom = CustomLicense::new("LicenseRef-Nordic-5-Clause");
        custom.name = Some("Nordic 5-Clause License".to_string());
        let normalizer = Normalizer::from_config(&LicensesConfig {
            custom: vec![custom],
        });
        let mut data = Data::new();
        data.add_package(Package::new("nrf"));
        data.add_file(File::new("a.c", "nrf", ["licenseref-nordic-5-clause"]));

        normalizer.run(&mut data).unwrap();

        assert_eq!(data.files[0].license_expr, "LicenseRef-Nordic-5-Clause");
        match &data.licenses["LicenseRef-Nordic-5-Clause"] {
            LicenseEntry::License(license) => {
                assert_eq!(license.name.as_deref(), Some("Nordic 5-Clause License"));
            }
            other => panic!("expected a license, got {other:?}"),
        }
    }

    #[test]
    fn scanner_cataloged_identifier_is_preserved() {
        let mut scanned = License::synthetic("LicenseRef-Scanned");
        scanned.name = Some("Found in LICENSE.txt".to_string());
        let mut data = Data::new();
        data.licenses
            .insert("LicenseRef-Scanned".to_string(), scanned.clone().into());
        data.add_package(Package::new("app"));
        data.add_file(File::new("a.c", "app", ["LicenseRef-Scanned"]));

        Normalizer::new().run(&mut data).unwrap();

        assert_eq!(data.files[0].license_expr, "LicenseRef-Scanned");
        assert_eq!(
            data.licenses["LicenseRef-Scanned"],
            LicenseEntry::License(scanned)
        );
    }
}
