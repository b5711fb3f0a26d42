//! License catalog construction.
//!
//! The catalog holds exactly the expressions used by files plus every
//! identifier those expressions are built from. It is built in two phases so
//! an expression entry is never overwritten by an identifier entry:
//!
//! 1. register one [`LicenseExpr`] per distinct non-atomic expression,
//! 2. register one [`License`] per distinct constituent identifier.

use crate::license::{ExpressionResolver, LicenseRegistry};
use crate::model::{Data, License, LicenseEntry, LicenseExpr};
use indexmap::{IndexMap, IndexSet};

/// Replace `data.licenses` with the entries referenced by the files
pub fn build_catalog(
    data: &mut Data,
    resolver: &dyn ExpressionResolver,
    registry: &dyn LicenseRegistry,
) {
    let expressions: IndexSet<&str> = data
        .files
        .iter()
        .map(|file| file.license_expr.as_str())
        .collect();

    let mut used: IndexMap<String, LicenseEntry> = IndexMap::new();
    let mut constituents: IndexSet<String> = IndexSet::new();

    for expression in expressions {
        let info = resolver.resolve(expression);
        if !used.contains_key(expression) && (!info.valid || !info.is_id_only) {
            let mut licenses = info.licenses.clone();
            licenses.sort();
            let custom = !info.valid || licenses.iter().any(|id| !registry.is_known_license(id));
            let entry = LicenseExpr {
                id: expression.to_string(),
                friendly_id: info.friendly_expr,
                valid: info.valid,
                licenses,
                custom,
            };
            used.insert(expression.to_string(), entry.into());
        }
        constituents.extend(info.licenses);
    }

    for id in constituents {
        if used.contains_key(&id) {
            continue;
        }
        let entry = resolve_identifier(&id, &data.licenses, registry);
        used.insert(id, entry);
    }

    tracing::debug!(
        previous = data.licenses.len(),
        current = used.len(),
        "Rebuilt license catalog"
    );
    data.licenses = used;
}

/// Catalog entry for one identifier.
///
/// Preference: standard SPDX metadata, then the entry the scanner already
/// provided, then any registered custom license, then a synthetic entry.
fn resolve_identifier(
    id: &str,
    previous: &IndexMap<String, LicenseEntry>,
    registry: &dyn LicenseRegistry,
) -> LicenseEntry {
    if registry.is_known_license(id) {
        if let Some(license) = registry.lookup_license(id) {
            return license.into();
        }
    }
    if let Some(entry) = previous.get(id) {
        return entry.clone();
    }
    registry.lookup_license(id).map_or_else(
        || {
            tracing::warn!(license = id, "Unknown license identifier, using a synthetic entry");
            License::synthetic(id).into()
        },
        LicenseEntry::from,
    )
}
