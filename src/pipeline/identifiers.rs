//! Presentation ordering, SPDX identifier assignment and package display metadata.

use crate::model::{Data, LicenseEntry, Package, LICENSE_REF_PREFIX, NO_LICENSE};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Version used for packages that do not report one
pub const NONE_VERSION: &str = "NoneVersion";

/// Name used for packages with neither a name, an id nor a URL
pub const NONE_NAME: &str = "NoneName";

const GITHUB_HOST: &str = "github.com";

/// Presentation group of a catalog entry, in display order.
///
/// The no-license entry comes first, then custom content, then the
/// well-known SPDX licenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseBucket {
    NoLicense,
    CustomExpression,
    CustomIdentifier,
    LicenseRef,
    StandardExpression,
    StandardIdentifier,
}

impl LicenseBucket {
    /// Bucket of the catalog entry stored under `key`
    #[must_use]
    pub fn of(key: &str, entry: &LicenseEntry) -> Self {
        if key == NO_LICENSE {
            Self::NoLicense
        } else if entry.is_expr() {
            if entry.is_custom() {
                Self::CustomExpression
            } else {
                Self::StandardExpression
            }
        } else if key.starts_with(LICENSE_REF_PREFIX) {
            Self::LicenseRef
        } else if entry.is_custom() {
            Self::CustomIdentifier
        } else {
            Self::StandardIdentifier
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NoLicense => "no-license",
            Self::CustomExpression => "custom-expression",
            Self::CustomIdentifier => "custom-identifier",
            Self::LicenseRef => "license-ref",
            Self::StandardExpression => "standard-expression",
            Self::StandardIdentifier => "standard-identifier",
        }
    }
}

impl fmt::Display for LicenseBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fill `licenses_sorted` and `packages_sorted`
pub fn sort_keys(data: &mut Data) {
    let mut licenses: Vec<(LicenseBucket, &String)> = data
        .licenses
        .iter()
        .map(|(key, entry)| (LicenseBucket::of(key, entry), key))
        .collect();
    licenses.sort();
    data.licenses_sorted = licenses.into_iter().map(|(_, key)| key.clone()).collect();

    let mut packages: Vec<String> = data.packages.keys().cloned().collect();
    packages.sort();
    data.packages_sorted = packages;
}

/// Number packages (in `packages_sorted` order) and files (in current order)
pub fn assign_identifiers(data: &mut Data) {
    for (index, package_id) in data.packages_sorted.iter().enumerate() {
        if let Some(package) = data.packages.get_mut(package_id) {
            package.spdx_id = Some(format!("SPDXRef-Package-{}", index + 1));
            package.external_refs.get_or_insert_with(Vec::new);
        }
    }
    for (index, file) in data.files.iter_mut().enumerate() {
        file.spdx_id = Some(format!("SPDXRef-File-{}", index + 1));
    }
    tracing::debug!(
        packages = data.packages_sorted.len(),
        files = data.files.len(),
        "Assigned SPDX identifiers"
    );
}

/// `owner/repo` part of a GitHub URL, without a trailing `.git`
fn github_repo_name(url: &str) -> Option<String> {
    let host_end = url.find(GITHUB_HOST)? + GITHUB_HOST.len();
    // Skip the separator after the host, whatever its width
    let mut rest = url.get(host_end..)?.chars();
    rest.next();
    let rest = rest.as_str();
    let name = rest.strip_suffix(".git").unwrap_or(rest);
    (!name.is_empty()).then(|| name.to_string())
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|candidate| !candidate.is_empty())
}

/// Derive missing names, versions and browser URLs; make names unique.
///
/// Name collisions are resolved by suffixing both packages with their
/// version. This is a single pass: two packages sharing name and version
/// still collide afterwards.
pub fn normalize_packages(packages: &mut IndexMap<String, Package>) {
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for index in 0..packages.len() {
        let Some((_, package)) = packages.get_index_mut(index) else {
            continue;
        };
        let version = package.version.get_or_insert_with(|| NONE_VERSION.to_string());
        let version = version.clone();
        let Some(url) = package.url.clone() else {
            continue;
        };

        if package.name.is_none() && url.contains(GITHUB_HOST) {
            package.name = github_repo_name(&url);
        }
        let name = package
            .name
            .get_or_insert_with(|| {
                first_non_empty(&[package.id.as_str(), url.as_str()])
                    .unwrap_or(NONE_NAME)
                    .to_string()
            })
            .clone();
        if package.browser_url.is_none() && url.starts_with("http") {
            package.browser_url = Some(url);
        }

        let name = match by_name.remove(&name) {
            Some(existing) if existing != index => {
                let renamed = format!("{name}-{version}");
                let existing_renamed = suffix_with_version(packages, existing);
                if existing_renamed == renamed {
                    tracing::warn!(
                        name = %renamed,
                        "Packages share name and version, names stay ambiguous"
                    );
                }
                by_name.insert(existing_renamed, existing);
                if let Some((_, package)) = packages.get_index_mut(index) {
                    package.name = Some(renamed.clone());
                }
                renamed
            }
            _ => name,
        };
        by_name.insert(name, index);
    }
}

/// Append `-{version}` to the name of the package at `index`, returning the new name
fn suffix_with_version(packages: &mut IndexMap<String, Package>, index: usize) -> String {
    let Some((_, package)) = packages.get_index_mut(index) else {
        return String::new();
    };
    let renamed = format!(
        "{}-{}",
        package.name.as_deref().unwrap_or_default(),
        package.version.as_deref().unwrap_or(NONE_VERSION)
    );
    package.name = Some(renamed.clone());
    renamed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{File, License, LicenseExpr};

    fn expr_entry(id: &str, custom: bool) -> LicenseEntry {
        LicenseExpr {
            id: id.to_string(),
            friendly_id: id.to_string(),
            valid: !custom,
            licenses: Vec::new(),
            custom,
        }
        .into()
    }

    fn license_entry(id: &str, custom: bool) -> LicenseEntry {
        let mut license = License::synthetic(id);
        license.custom = custom;
        license.into()
    }

    fn packages(list: Vec<Package>) -> IndexMap<String, Package> {
        list.into_iter().map(|p| (p.id.clone(), p)).collect()
    }

    #[test]
    fn licenses_are_sorted_by_bucket_then_key() {
        let mut data = Data::new();
        for (key, entry) in [
            ("MIT", license_entry("MIT", false)),
            ("Apache-2.0 AND MIT", expr_entry("Apache-2.0 AND MIT", false)),
            ("LicenseRef-B", license_entry("LicenseRef-B", true)),
            ("ACME", license_entry("ACME", true)),
            ("ACME OR MIT", expr_entry("ACME OR MIT", true)),
            ("", expr_entry("", true)),
            ("Apache-2.0", license_entry("Apache-2.0", false)),
            ("LicenseRef-A", license_entry("LicenseRef-A", true)),
        ] {
            data.licenses.insert(key.to_string(), entry);
        }

        sort_keys(&mut data);

        assert_eq!(
            data.licenses_sorted,
            vec![
                "",
                "ACME OR MIT",
                "ACME",
                "LicenseRef-A",
                "LicenseRef-B",
                "Apache-2.0 AND MIT",
                "Apache-2.0",
                "MIT",
            ]
        );
    }

    #[test]
    fn bucket_of_license_ref_ignores_custom_flag() {
        assert_eq!(
            LicenseBucket::of("LicenseRef-X", &license_entry("LicenseRef-X", false)),
            LicenseBucket::LicenseRef
        );
        assert_eq!(LicenseBucket::LicenseRef.to_string(), "license-ref");
    }

    #[test]
    fn identifiers_follow_sorted_order() {
        let mut data = Data::new();
        data.add_package(Package::new("zephyr"));
        data.add_package(Package::new("app"));
        data.add_file(File::new("b.c", "app", ["MIT"]));
        data.add_file(File::new("a.c", "app", ["MIT"]));

        sort_keys(&mut data);
        assign_identifiers(&mut data);

        assert_eq!(data.packages_sorted, vec!["app", "zephyr"]);
        assert_eq!(data.packages["app"].spdx_id.as_deref(), Some("SPDXRef-Package-1"));
        assert_eq!(data.packages["zephyr"].spdx_id.as_deref(), Some("SPDXRef-Package-2"));
        assert_eq!(data.packages["app"].external_refs, Some(Vec::new()));
        assert_eq!(data.files[0].spdx_id.as_deref(), Some("SPDXRef-File-1"));
        assert_eq!(data.files[1].spdx_id.as_deref(), Some("SPDXRef-File-2"));
    }

    #[test]
    fn missing_version_defaults_even_without_url() {
        let mut list = packages(vec![Package::new("local")]);
        normalize_packages(&mut list);
        assert_eq!(list["local"].version.as_deref(), Some(NONE_VERSION));
        assert!(list["local"].name.is_none());
    }

    #[test]
    fn github_name_is_derived_from_url() {
        let mut list = packages(vec![
            Package::new("zephyr").with_url("https://github.com/nrfconnect/sdk-zephyr.git"),
            Package::new("mcuboot").with_url("git@github.com:mcu-tools/mcuboot"),
        ]);
        normalize_packages(&mut list);

        assert_eq!(list["zephyr"].name.as_deref(), Some("nrfconnect/sdk-zephyr"));
        assert_eq!(
            list["zephyr"].browser_url.as_deref(),
            Some("https://github.com/nrfconnect/sdk-zephyr.git")
        );
        assert_eq!(list["mcuboot"].name.as_deref(), Some("mcu-tools/mcuboot"));
        assert!(list["mcuboot"].browser_url.is_none());
    }

    #[test]
    fn name_falls_back_to_id_then_url() {
        let mut list = packages(vec![
            Package::new("hal_nordic").with_url("https://example.com/hal.git"),
            Package::new("").with_url("https://example.com/bare"),
        ]);
        normalize_packages(&mut list);

        assert_eq!(list["hal_nordic"].name.as_deref(), Some("hal_nordic"));
        assert_eq!(list[""].name.as_deref(), Some("https://example.com/bare"));
    }

    #[test]
    fn existing_name_and_browser_url_are_kept() {
        let mut package = Package::new("p")
            .with_name("Pretty")
            .with_url("https://github.com/org/p");
        package.browser_url = Some("https://example.com".to_string());
        let mut list = packages(vec![package]);
        normalize_packages(&mut list);

        assert_eq!(list["p"].name.as_deref(), Some("Pretty"));
        assert_eq!(list["p"].browser_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn colliding_names_get_version_suffixes() {
        let mut list = packages(vec![
            Package::new("lib-a")
                .with_url("https://github.com/org/lib")
                .with_version("1.0"),
            Package::new("lib-b")
                .with_url("https://github.com/org/lib.git")
                .with_version("2.0"),
        ]);
        normalize_packages(&mut list);

        assert_eq!(list["lib-a"].name.as_deref(), Some("org/lib-1.0"));
        assert_eq!(list["lib-b"].name.as_deref(), Some("org/lib-2.0"));
    }

    #[test]
    fn collision_with_same_version_is_left_ambiguous() {
        let mut list = packages(vec![
            Package::new("a").with_name("dup").with_url("https://x/a"),
            Package::new("b").with_name("dup").with_url("https://x/b"),
        ]);
        normalize_packages(&mut list);

        assert_eq!(list["a"].name.as_deref(), Some("dup-NoneVersion"));
        assert_eq!(list["b"].name.as_deref(), Some("dup-NoneVersion"));
    }

    #[test]
    fn github_repo_name_edge_cases() {
        assert_eq!(github_repo_name("https://github.com/"), None);
        assert_eq!(github_repo_name("https://github.com"), None);
        assert_eq!(
            github_repo_name("https://github.com/org/repo/tree/main"),
            Some("org/repo/tree/main".to_string())
        );
    }

    #[test]
    fn github_repo_name_skips_one_multibyte_separator() {
        assert_eq!(
            github_repo_name("https://github.com\u{2215}org/lib"),
            Some("org/lib".to_string())
        );
        assert_eq!(github_repo_name("github.com\u{e9}"), None);
    }
}
