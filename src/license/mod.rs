//! License expression resolution and license registry lookup.
//!
//! The normalization pipeline never parses SPDX expressions or consults the
//! SPDX license list itself. It talks to two collaborators:
//!
//! - [`ExpressionResolver`] parses a license-expression string into an
//!   [`ExprInfo`].
//! - [`LicenseRegistry`] answers whether an identifier is a standard SPDX
//!   license/exception and returns its canonical metadata.
//!
//! [`SpdxExpressionResolver`] and [`SpdxLicenseRegistry`] are offline
//! implementations backed by the license list bundled with the `spdx` crate.
//! Both can be extended with custom (`LicenseRef-`) licenses from the
//! configuration file.

mod expression;
mod registry;

pub use expression::SpdxExpressionResolver;
pub use registry::{canonical_spdx_id, SpdxLicenseRegistry};

use crate::model::License;

/// Outcome of parsing one license-expression string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExprInfo {
    /// The string is well-formed SPDX expression syntax
    pub valid: bool,
    /// The string is exactly one license identifier, no operators
    pub is_id_only: bool,
    /// An `OR` appears outside of any parentheses
    pub or_present: bool,
    /// License and exception identifiers referenced, in order of appearance, deduplicated
    pub licenses: Vec<String>,
    /// Canonical rendering; the input unchanged when it is not valid
    pub friendly_expr: String,
}

impl ExprInfo {
    /// Info for a string that failed to parse
    pub fn invalid(raw: impl Into<String>) -> Self {
        Self {
            friendly_expr: raw.into(),
            ..Self::default()
        }
    }
}

/// Parses SPDX license expressions
pub trait ExpressionResolver {
    fn resolve(&self, expression: &str) -> ExprInfo;
}

/// Canonical license metadata source
pub trait LicenseRegistry {
    /// Member of the SPDX license or exception list
    fn is_known_license(&self, id: &str) -> bool;

    /// Canonical metadata for a known or registered custom identifier
    fn lookup_license(&self, id: &str) -> Option<License>;
}

impl<T: ExpressionResolver + ?Sized> ExpressionResolver for &T {
    fn resolve(&self, expression: &str) -> ExprInfo {
        (**self).resolve(expression)
    }
}

impl<T: LicenseRegistry + ?Sized> LicenseRegistry for &T {
    fn is_known_license(&self, id: &str) -> bool {
        (**self).is_known_license(id)
    }

    fn lookup_license(&self, id: &str) -> Option<License> {
        (**self).lookup_license(id)
    }
}
