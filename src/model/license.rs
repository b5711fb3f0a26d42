//! License catalog entries.
//!
//! A catalog key maps either to an atomic [`License`] or to a compound /
//! non-atomic [`LicenseExpr`]. Both carry a `custom` flag which is set when
//! the entry is not fully described by the standard SPDX license list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix reserved by SPDX for user-defined license identifiers
pub const LICENSE_REF_PREFIX: &str = "LicenseRef-";

/// Catalog key used for files where no license was detected
pub const NO_LICENSE: &str = "";

/// A resolved, atomic license identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Identifier, e.g. `Apache-2.0` or `LicenseRef-Nordic-5-Clause`
    pub id: String,
    /// Identifier as shown to humans
    pub friendly_id: String,
    /// Full license name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Reference URL for the license text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Not part of the standard SPDX license list
    #[serde(default)]
    pub custom: bool,
}

impl License {
    /// Placeholder entry for an identifier nobody knows anything about.
    ///
    /// The raw identifier doubles as display id.
    pub fn synthetic(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            friendly_id: id.clone(),
            id,
            name: None,
            url: None,
            custom: true,
        }
    }

    /// Whether the identifier sits under the `LicenseRef-` namespace
    #[must_use]
    pub fn is_license_ref(&self) -> bool {
        self.id.starts_with(LICENSE_REF_PREFIX)
    }
}

/// A resolved license expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseExpr {
    /// The expression string as produced for the file; doubles as catalog key
    pub id: String,
    /// Canonical rendering of the expression
    pub friendly_id: String,
    /// Whether the expression is well-formed SPDX syntax
    pub valid: bool,
    /// Constituent identifiers, sorted
    #[serde(default)]
    pub licenses: Vec<String>,
    /// Invalid, or references an identifier outside the SPDX license list
    #[serde(default)]
    pub custom: bool,
}

/// One entry of the document license catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LicenseEntry {
    License(License),
    Expression(LicenseExpr),
}

impl LicenseEntry {
    /// The catalog key of this entry
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::License(license) => &license.id,
            Self::Expression(expr) => &expr.id,
        }
    }

    /// Display form of the entry
    #[must_use]
    pub fn friendly_id(&self) -> &str {
        match self {
            Self::License(license) => &license.friendly_id,
            Self::Expression(expr) => &expr.friendly_id,
        }
    }

    #[must_use]
    pub const fn is_expr(&self) -> bool {
        matches!(self, Self::Expression(_))
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        match self {
            Self::License(license) => license.custom,
            Self::Expression(expr) => expr.custom,
        }
    }

    /// Identifiers this entry is made of. An atomic license is its own constituent.
    #[must_use]
    pub fn constituents(&self) -> Vec<&str> {
        match self {
            Self::License(license) => vec![license.id.as_str()],
            Self::Expression(expr) => expr.licenses.iter().map(String::as_str).collect(),
        }
    }
}

impl From<License> for LicenseEntry {
    fn from(license: License) -> Self {
        Self::License(license)
    }
}

impl From<LicenseExpr> for LicenseEntry {
    fn from(expr: LicenseExpr) -> Self {
        Self::Expression(expr)
    }
}

impl fmt::Display for LicenseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.friendly_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_license_uses_raw_id_everywhere() {
        let license = License::synthetic("ACME-PROPRIETARY");
        assert_eq!(license.id, "ACME-PROPRIETARY");
        assert_eq!(license.friendly_id, "ACME-PROPRIETARY");
        assert!(license.custom);
        assert!(!license.is_license_ref());
    }

    #[test]
    fn entry_accessors() {
        let expr = LicenseEntry::from(LicenseExpr {
            id: "MIT OR ZLIB".to_string(),
            friendly_id: "MIT OR Zlib".to_string(),
            valid: true,
            licenses: vec!["MIT".to_string(), "Zlib".to_string()],
            custom: false,
        });
        assert!(expr.is_expr());
        assert!(!expr.is_custom());
        assert_eq!(expr.id(), "MIT OR ZLIB");
        assert_eq!(expr.to_string(), "MIT OR Zlib");
        assert_eq!(expr.constituents(), vec!["MIT", "Zlib"]);

        let license = LicenseEntry::from(License::synthetic("LicenseRef-X"));
        assert!(!license.is_expr());
        assert_eq!(license.constituents(), vec!["LicenseRef-X"]);
    }

    #[test]
    fn entry_serializes_with_kind_tag() {
        let entry = LicenseEntry::from(License::synthetic("FOO"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "license");
        let back: LicenseEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
