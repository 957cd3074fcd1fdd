//! Package identity types shared by the registry and the injector.

use serde::{Deserialize, Serialize};

/// Identity snapshot of one discoverable content pack.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageDescriptor {
    /// Human-readable name, not guaranteed unique
    pub name: String,
    /// Stable identifier, expected unique within a catalog
    pub project_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// True when `selector` equals either the name or the project id.
    pub fn is_selected_by(&self, selector: &str) -> bool {
        self.name == selector || self.project_id == selector
    }

    /// Build the dependency-list entry that points at this pack.
    pub fn to_reference(&self) -> PackageReference {
        PackageReference::from(self)
    }
}

/// A dependency-list entry.
///
/// Two references are equal only when all four fields match; the injector
/// relies on this to avoid inserting the same pack twice.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PackageReference {
    pub package_id: String,
    pub package_name: String,
    #[serde(default)]
    pub package_version: String,
    #[serde(default)]
    pub package_description: String,
}

impl From<&PackageDescriptor> for PackageReference {
    fn from(pack: &PackageDescriptor) -> Self {
        PackageReference {
            package_id: pack.project_id.clone(),
            package_name: pack.name.clone(),
            package_version: pack.version.clone(),
            package_description: pack.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_selected_by_name_or_id() {
        let pack = PackageDescriptor::new("Foo", "123");
        assert!(pack.is_selected_by("Foo"));
        assert!(pack.is_selected_by("123"));
        assert!(!pack.is_selected_by("foo"));
        assert!(!pack.is_selected_by(""));
    }

    #[test]
    fn test_reference_copies_all_fields() {
        let pack = PackageDescriptor {
            description: "Extra portraits".into(),
            ..PackageDescriptor::new("Portraits", "portraits-01").with_version("1.2")
        };
        let reference = pack.to_reference();

        assert_eq!(reference.package_id, "portraits-01");
        assert_eq!(reference.package_name, "Portraits");
        assert_eq!(reference.package_version, "1.2");
        assert_eq!(reference.package_description, "Extra portraits");
    }

    #[test]
    fn test_reference_equality_needs_every_field() {
        let a = PackageDescriptor::new("Portraits", "portraits-01").with_version("1.0");
        let b = a.clone().with_version("1.1");
        let c = PackageDescriptor {
            description: "changed".into(),
            ..a.clone()
        };

        assert_eq!(a.to_reference(), a.clone().to_reference());
        assert_ne!(a.to_reference(), b.to_reference());
        assert_ne!(a.to_reference(), c.to_reference());
    }

    #[test]
    fn test_descriptor_deserialize_optional_fields() {
        let json = r#"{"name": "Portraits", "project_id": "portraits-01"}"#;
        let pack: PackageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(pack, PackageDescriptor::new("Portraits", "portraits-01"));
    }
}
