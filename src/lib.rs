//! **Normalization of software-inventory snapshots for SPDX document generation.**
//!
//! `sbom-prep` takes the files, packages, licenses and relationships collected
//! by a source scanner and turns them into a canonical, internally consistent
//! inventory that a document renderer can emit as-is.
//!
//! Scanners report messy license data: lower-cased identifiers, compound
//! expressions mixed with bare identifiers, strings that are not SPDX at all.
//! The pipeline reconciles these into one valid SPDX expression per file,
//! catalogs every expression and identifier that is actually referenced,
//! assigns stable `SPDXRef-` identifiers and rebuilds the relationship graph.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the inventory snapshot, [`Data`], with its files,
//!   packages, license catalog and relationships.
//! - **[`license`]**: SPDX expression parsing ([`SpdxExpressionResolver`]) and
//!   license metadata lookup ([`SpdxLicenseRegistry`]) behind the
//!   [`ExpressionResolver`] and [`LicenseRegistry`] traits.
//! - **[`pipeline`]**: [`pre_process`], the ordered normalization passes,
//!   plus snapshot I/O.
//! - **[`config`]**: YAML configuration with custom license definitions.
//!
//! ## Getting Started
//!
//! ```
//! use sbom_prep::model::{Data, File, Package};
//! use sbom_prep::Normalizer;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut data = Data::new();
//!     data.add_package(Package::new("zephyr").with_url("https://github.com/zephyrproject-rtos/zephyr"));
//!     data.add_file(File::new("kernel/sched.c", "zephyr", ["apache-2.0"]));
//!     data.add_file(File::new("lib/libc/string.c", "zephyr", ["MIT OR BSD-3-Clause", "GPL-2.0"]));
//!
//!     let stats = Normalizer::new().run(&mut data)?;
//!
//!     assert_eq!(data.files[0].license_expr, "Apache-2.0");
//!     assert_eq!(data.files[1].license_expr, "(MIT OR BSD-3-Clause) AND GPL-2.0");
//!     assert_eq!(data.packages["zephyr"].spdx_id.as_deref(), Some("SPDXRef-Package-1"));
//!     assert_eq!(stats.relationships, 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `sbom-prep` binary wraps the library: `sbom-prep normalize scan.json`
//! reads a JSON snapshot and writes the normalized one.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::fn_params_excessive_bools,
    // Variable names like `used`/`uses` or `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod license;
pub mod model;
pub mod pipeline;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{ErrorContext, PrepError, Result};
pub use license::{
    ExprInfo, ExpressionResolver, LicenseRegistry, SpdxExpressionResolver, SpdxLicenseRegistry,
};
pub use model::{Data, File, License, LicenseEntry, LicenseExpr, Package, Relationship};
pub use pipeline::{pre_process, LicenseBucket, Normalizer, PreProcessStats};
