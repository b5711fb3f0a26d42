//! License registry backed by the SPDX license list bundled with the `spdx` crate.

use super::LicenseRegistry;
use crate::model::License;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::OnceLock;

const SPDX_LICENSE_URL: &str = "https://spdx.org/licenses";

/// An identifier from the SPDX license or exception list
#[derive(Debug, Clone, Copy)]
struct ListEntry {
    name: &'static str,
    /// Licenses only; the bundled exception list carries no full names
    full_name: Option<&'static str>,
}

/// Upper-cased identifier -> list entry, covering licenses and exceptions.
fn spdx_list() -> &'static HashMap<String, ListEntry> {
    static INDEX: OnceLock<HashMap<String, ListEntry>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let licenses = spdx::identifiers::LICENSES
            .iter()
            .map(|&(name, full_name, ..)| ListEntry {
                name,
                full_name: Some(full_name),
            });
        let exceptions = spdx::identifiers::EXCEPTIONS
            .iter()
            .map(|&(name, ..)| ListEntry {
                name,
                full_name: None,
            });
        licenses
            .chain(exceptions)
            .map(|entry| (entry.name.to_ascii_uppercase(), entry))
            .collect()
    })
}

/// List entry spelled exactly like `id`
fn exact_entry(id: &str) -> Option<ListEntry> {
    spdx_list()
        .get(&id.to_ascii_uppercase())
        .copied()
        .filter(|entry| entry.name == id)
}

/// Case-insensitive mapping of an identifier onto its SPDX list spelling.
///
/// `apache-2.0` and `APACHE-2.0` both give `Apache-2.0`. Returns `None`
/// for identifiers that are not on the list.
#[must_use]
pub fn canonical_spdx_id(id: &str) -> Option<&'static str> {
    spdx_list().get(&id.to_ascii_uppercase()).map(|entry| entry.name)
}

/// Offline [`LicenseRegistry`] with optional custom entries.
///
/// Standard identifiers always resolve to the SPDX list metadata; custom
/// entries are only consulted for identifiers the list does not know.
#[derive(Debug, Clone, Default)]
pub struct SpdxLicenseRegistry {
    /// Custom licenses keyed by upper-cased id
    custom: IndexMap<String, License>,
}

impl SpdxLicenseRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that additionally knows the given custom licenses
    pub fn with_custom<I>(licenses: I) -> Self
    where
        I: IntoIterator<Item = License>,
    {
        let mut registry = Self::new();
        for license in licenses {
            registry.register(license);
        }
        registry
    }

    /// Register a custom license, returning the entry it replaced
    pub fn register(&mut self, license: License) -> Option<License> {
        self.custom.insert(license.id.to_ascii_uppercase(), license)
    }

    /// Ids of all registered custom licenses, in registration order
    pub fn custom_ids(&self) -> impl Iterator<Item = &str> {
        self.custom.values().map(|license| license.id.as_str())
    }

    fn standard_license(id: &str) -> Option<License> {
        if let Some(entry) = exact_entry(id) {
            return Some(License {
                id: entry.name.to_string(),
                friendly_id: entry.name.to_string(),
                name: entry.full_name.map(str::to_string),
                url: Some(format!("{SPDX_LICENSE_URL}/{}.html", entry.name)),
                custom: false,
            });
        }
        // `GPL-2.0+` style: any version from the base on
        let base = exact_entry(id.strip_suffix('+')?)?;
        let full_name = base.full_name?;
        Some(License {
            id: id.to_string(),
            friendly_id: id.to_string(),
            name: Some(format!("{full_name} or later")),
            url: Some(format!("{SPDX_LICENSE_URL}/{}.html", base.name)),
            custom: false,
        })
    }
}

impl LicenseRegistry for SpdxLicenseRegistry {
    fn is_known_license(&self, id: &str) -> bool {
        Self::standard_license(id).is_some()
    }

    fn lookup_license(&self, id: &str) -> Option<License> {
        Self::standard_license(id).or_else(|| self.custom.get(&id.to_ascii_uppercase()).cloned())
    }
}
