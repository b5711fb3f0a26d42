//! Relationship graph reconstruction.

use crate::model::{Data, Relationship, RelationshipType, DOCUMENT_SPDX_ID};
use indexmap::IndexMap;

/// Whether an input relationship is rebuilt from scratch
fn is_derived(relationship: &Relationship) -> bool {
    match relationship.relationship_type {
        RelationshipType::Describes => relationship.spdx_id == DOCUMENT_SPDX_ID,
        RelationshipType::Contains => true,
        RelationshipType::Other(_) => false,
    }
}

/// Rebuild the DESCRIBES and CONTAINS edges from the assigned identifiers.
///
/// Other relationships pass through in their original order, followed by
/// the DESCRIBES edges and then the CONTAINS edges.
pub fn derive_relationships(data: &mut Data) {
    let mut relationships: Vec<Relationship> = std::mem::take(&mut data.relationships)
        .into_iter()
        .filter(|rel| !is_derived(rel))
        .collect();
    let kept = relationships.len();

    let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for file in &data.files {
        let files = groups.entry(file.package.as_str()).or_default();
        if let Some(spdx_id) = file.spdx_id.as_deref() {
            files.push(spdx_id);
        }
    }

    for package_id in &data.packages_sorted {
        if !groups.contains_key(package_id.as_str()) {
            continue;
        }
        if let Some(spdx_id) = data.packages.get(package_id).and_then(|p| p.spdx_id.as_deref()) {
            relationships.push(Relationship::describes(spdx_id));
        }
    }

    for (package_id, files) in &groups {
        let Some(package_spdx_id) = data.packages.get(*package_id).and_then(|p| p.spdx_id.as_deref())
        else {
            tracing::warn!(package = package_id, "Skipping files of a package without identifier");
            continue;
        };
        relationships.extend(
            files
                .iter()
                .map(|file_spdx_id| Relationship::contains(package_spdx_id, *file_spdx_id)),
        );
    }

    tracing::debug!(
        kept,
        derived = relationships.len() - kept,
        "Rebuilt relationships"
    );
    data.relationships = relationships;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{File, Package};
    use crate::pipeline::identifiers::{assign_identifiers, sort_keys};

    fn snapshot() -> Data {
        let mut data = Data::new();
        data.add_package(Package::new("app"));
        data.add_package(Package::new("empty"));
        data.add_file(File::new("a.c", "app", ["MIT"]));
        data.add_file(File::new("b.c", "app", ["MIT"]));
        sort_keys(&mut data);
        assign_identifiers(&mut data);
        data
    }

    #[test]
    fn describes_only_packages_with_files() {
        let mut data = snapshot();
        derive_relationships(&mut data);

        let describes: Vec<_> = data.relationships_of(&RelationshipType::Describes).collect();
        assert_eq!(describes, vec![&Relationship::describes("SPDXRef-Package-1")]);

        let contains: Vec<String> = data
            .relationships_of(&RelationshipType::Contains)
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            contains,
            vec![
                "SPDXRef-Package-1 CONTAINS SPDXRef-File-1",
                "SPDXRef-Package-1 CONTAINS SPDXRef-File-2",
            ]
        );
        assert_eq!(data.relationships.len(), 3);
    }

    #[test]
    fn stale_edges_are_replaced_and_others_kept() {
        let mut data = snapshot();
        data.relationships = vec![
            Relationship::describes("SPDXRef-Package-9"),
            Relationship::contains("SPDXRef-Package-9", "SPDXRef-File-9"),
            Relationship::new("SPDXRef-Package-2", "DESCRIBES", "SPDXRef-File-1"),
            Relationship::new("SPDXRef-File-1", "GENERATED_FROM", "SPDXRef-File-2"),
        ];

        derive_relationships(&mut data);

        assert_eq!(
            data.relationships[0],
            Relationship::new("SPDXRef-Package-2", "DESCRIBES", "SPDXRef-File-1")
        );
        assert_eq!(
            data.relationships[1].relationship_type,
            RelationshipType::Other("GENERATED_FROM".to_string())
        );
        assert_eq!(data.relationships.len(), 5);
        assert!(!data
            .relationships
            .iter()
            .any(|rel| rel.spdx_id == "SPDXRef-Package-9"));
    }

    #[test]
    fn rerun_does_not_duplicate_edges() {
        let mut data = snapshot();
        derive_relationships(&mut data);
        let first = data.relationships.clone();
        derive_relationships(&mut data);
        assert_eq!(data.relationships, first);
    }

    #[test]
    fn files_of_unknown_packages_are_skipped() {
        let mut data = snapshot();
        data.add_file(File::new("c.c", "ghost", ["MIT"]));
        data.files[2].spdx_id = Some("SPDXRef-File-3".to_string());

        derive_relationships(&mut data);

        assert_eq!(data.relationships_of(&RelationshipType::Contains).count(), 2);
    }
}
