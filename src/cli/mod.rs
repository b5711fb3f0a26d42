//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod licenses;
mod normalize;

pub use licenses::{license_listing, run_licenses, LicenseListing};
pub use normalize::{normalize_file, run_normalize, NormalizeConfig};
