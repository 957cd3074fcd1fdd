//! `pack.json` records read by the content registry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::runtime::Runtime;

use super::{PackageDescriptor, PackageReference};

/// File name the registry looks for inside each pack directory.
pub const MANIFEST_FILE: &str = "pack.json";

/// One pack as recorded on disk: its identity plus the dependencies it
/// declares before any injection happens.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PackManifest {
    #[serde(flatten)]
    pub descriptor: PackageDescriptor,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<PackageReference>,
}

impl PackManifest {
    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let manifest: PackManifest = serde_json::from_str(&content)
            .with_context(|| format!("Invalid pack manifest {:?}", path))?;
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    #[test]
    fn test_manifest_load() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/packs/Dragonfall/pack.json");

        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| {
                Ok(r#"{
                    "name": "Dragonfall",
                    "project_id": "df-001",
                    "version": "2.0",
                    "description": "Berlin",
                    "dependencies": [
                        {"package_id": "core", "package_name": "Core", "package_version": "1.0"}
                    ]
                }"#
                .to_string())
            });

        let manifest = PackManifest::load(&runtime, &path).unwrap();
        assert_eq!(manifest.descriptor.name, "Dragonfall");
        assert_eq!(manifest.descriptor.project_id, "df-001");
        assert_eq!(manifest.descriptor.version, "2.0");
        assert_eq!(manifest.dependencies.len(), 1);
        assert_eq!(manifest.dependencies[0].package_name, "Core");
        assert_eq!(manifest.dependencies[0].package_description, "");
    }

    #[test]
    fn test_manifest_load_without_dependencies() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok(r#"{"name": "Portraits", "project_id": "p1"}"#.to_string()));

        let manifest = PackManifest::load(&runtime, Path::new("/packs/p/pack.json")).unwrap();
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn test_manifest_load_invalid_json() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("{ not json".to_string()));

        let err = PackManifest::load(&runtime, Path::new("/packs/p/pack.json")).unwrap_err();
        assert!(err.to_string().contains("Invalid pack manifest"));
    }

    #[test]
    fn test_manifest_serialize_skips_empty_dependencies() {
        let manifest = PackManifest {
            descriptor: PackageDescriptor::new("Portraits", "p1"),
            dependencies: vec![],
        };
        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.contains("\"project_id\":\"p1\""));
        assert!(!json.contains("dependencies"));
    }
}
