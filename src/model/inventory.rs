//! Inventory snapshot: files, packages, licenses and relationships.

use super::LicenseEntry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// SPDX identifier of the document itself
pub const DOCUMENT_SPDX_ID: &str = "SPDXRef-DOCUMENT";

/// A scanned file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    /// Path of the file; sort key
    pub file_path: String,
    /// Raw license tokens reported by the scanner, in detection order
    pub licenses: Vec<String>,
    /// Names of the detectors that reported a license
    pub detectors: BTreeSet<String>,
    /// Id of the owning package
    pub package: String,
    /// Normalized SPDX license expression, a key of [`Data::licenses`]
    pub license_expr: String,
    /// Assigned `SPDXRef-File-N` identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spdx_id: Option<String>,
}

impl File {
    /// Create a file owned by `package` with the given raw license tokens
    pub fn new<I, S>(file_path: impl Into<String>, package: impl Into<String>, licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file_path: file_path.into(),
            package: package.into(),
            licenses: licenses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a detector tag
    #[must_use]
    pub fn with_detector(mut self, detector: impl Into<String>) -> Self {
        self.detectors.insert(detector.into());
        self
    }
}

/// External reference of a package (e.g. a purl or CPE)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRef {
    pub category: String,
    pub reference_type: String,
    pub locator: String,
}

/// A package owning files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    /// Key of the package, stable within one snapshot
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Source location, usually a git remote
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Location to show to a human in a browser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_refs: Option<Vec<ExternalRef>>,
    /// Assigned `SPDXRef-Package-N` identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spdx_id: Option<String>,
}

impl Package {
    /// Create a package with only its key set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Relationship kinds the pipeline cares about; anything else passes through
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    Describes,
    Contains,
    Other(String),
}

impl RelationshipType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Describes => "DESCRIBES",
            Self::Contains => "CONTAINS",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for RelationshipType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DESCRIBES" => Self::Describes,
            "CONTAINS" => Self::Contains,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for RelationshipType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<RelationshipType> for String {
    fn from(value: RelationshipType) -> Self {
        match value {
            RelationshipType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed SPDX relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    /// Source element
    pub spdx_id: String,
    pub relationship_type: RelationshipType,
    /// Target element
    pub related_spdx_id: String,
}

impl Relationship {
    pub fn new(
        spdx_id: impl Into<String>,
        relationship_type: impl Into<RelationshipType>,
        related_spdx_id: impl Into<String>,
    ) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            relationship_type: relationship_type.into(),
            related_spdx_id: related_spdx_id.into(),
        }
    }

    /// `SPDXRef-DOCUMENT DESCRIBES <package>`
    pub fn describes(package_spdx_id: impl Into<String>) -> Self {
        Self::new(DOCUMENT_SPDX_ID, RelationshipType::Describes, package_spdx_id)
    }

    /// `<package> CONTAINS <file>`
    pub fn contains(package_spdx_id: impl Into<String>, file_spdx_id: impl Into<String>) -> Self {
        Self::new(package_spdx_id, RelationshipType::Contains, file_spdx_id)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.spdx_id, self.relationship_type, self.related_spdx_id
        )
    }
}

/// The aggregate inventory snapshot handed to the pipeline.
///
/// Created by the scanner, normalized in place by
/// [`pre_process`](crate::pipeline::pre_process) and then handed to a
/// document renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    pub files: Vec<File>,
    /// Packages indexed by id
    pub packages: IndexMap<String, Package>,
    /// License catalog indexed by expression / identifier
    pub licenses: IndexMap<String, LicenseEntry>,
    /// Catalog keys in presentation order
    pub licenses_sorted: Vec<String>,
    /// Package ids in presentation order
    pub packages_sorted: Vec<String>,
    /// Every detector that contributed to any file
    pub detectors: BTreeSet<String>,
    pub relationships: Vec<Relationship>,
}

impl Data {
    /// Create an empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package, replacing any previous package with the same id
    pub fn add_package(&mut self, package: Package) {
        self.packages.insert(package.id.clone(), package);
    }

    pub fn add_file(&mut self, file: File) {
        self.files.push(file);
    }

    /// The package owning `file`, if it is cataloged
    #[must_use]
    pub fn package_of(&self, file: &File) -> Option<&Package> {
        self.packages.get(&file.package)
    }

    /// Relationships of a given kind
    pub fn relationships_of<'a>(
        &'a self,
        kind: &RelationshipType,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        let kind = kind.clone();
        self.relationships
            .iter()
            .filter(move |rel| rel.relationship_type == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_type_round_trips_through_strings() {
        assert_eq!(RelationshipType::from("DESCRIBES"), RelationshipType::Describes);
        assert_eq!(RelationshipType::from("CONTAINS"), RelationshipType::Contains);
        assert_eq!(
            RelationshipType::from("GENERATED_FROM"),
            RelationshipType::Other("GENERATED_FROM".to_string())
        );
        assert_eq!(String::from(RelationshipType::Contains), "CONTAINS");
    }

    #[test]
    fn relationship_serializes_type_as_plain_string() {
        let rel = Relationship::describes("SPDXRef-Package-1");
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["relationship_type"], "DESCRIBES");
        assert_eq!(json["spdx_id"], DOCUMENT_SPDX_ID);
        assert_eq!(rel.to_string(), "SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package-1");
    }

    #[test]
    fn data_deserializes_from_partial_json() {
        let json = r#"{
            "files": [{"file_path": "a.c", "package": "p", "licenses": ["MIT"]}],
            "packages": {"p": {"id": "p", "url": "https://github.com/org/p"}}
        }"#;
        let data: Data = serde_json::from_str(json).unwrap();
        assert_eq!(data.files.len(), 1);
        assert!(data.relationships.is_empty());
        assert_eq!(data.package_of(&data.files[0]).map(|p| p.id.as_str()), Some("p"));
        assert!(data.packages["p"].external_refs.is_none());
    }

    #[test]
    fn file_builder_collects_detectors() {
        let file = File::new("a.c", "p", ["MIT"])
            .with_detector("spdx-tag")
            .with_detector("scancode");
        assert_eq!(file.detectors.len(), 2);
        assert_eq!(file.licenses, vec!["MIT".to_string()]);
    }
}
