//! Content registry: ordered search paths and the packs found in them.

use log::{debug, warn};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

use super::{
    Catalog, CatalogProvider, PackManifest, PackageDescriptor, PackageReference, find_all_packs,
};

/// Where a search path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackOrigin {
    /// Folders the game ships with
    Builtin,
    /// Folders appended from the user's configuration
    Local,
}

impl fmt::Display for PackOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackOrigin::Builtin => write!(f, "builtin"),
            PackOrigin::Local => write!(f, "local"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    pub path: PathBuf,
    pub origin: PackOrigin,
}

/// A pack found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredPack {
    pub descriptor: PackageDescriptor,
    /// Dependencies declared by the pack itself, before injection
    pub dependencies: Vec<PackageReference>,
    pub dir: PathBuf,
    pub origin: PackOrigin,
}

/// Registry of content packs reachable from a list of search paths.
///
/// Search paths are scanned in registration order; the catalog stays `None`
/// until [`ContentRegistry::refresh`] has run once.
pub struct ContentRegistry<'a, R: Runtime> {
    runtime: &'a R,
    search_paths: Vec<SearchPath>,
    packs: Option<Vec<DiscoveredPack>>,
}

impl<'a, R: Runtime> ContentRegistry<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self {
            runtime,
            search_paths: Vec::new(),
            packs: None,
        }
    }

    /// Register a search path at the end of the list. Re-registering a path
    /// already present is ignored.
    pub fn include_search_path(&mut self, path: impl Into<PathBuf>, origin: PackOrigin) {
        let path = path.into();
        if self.search_paths.iter().any(|s| s.path == path) {
            debug!("Search path {:?} already registered", path);
            return;
        }
        debug!("Registering {} search path {:?}", origin, path);
        self.search_paths.push(SearchPath { path, origin });
    }

    pub fn search_paths(&self) -> &[SearchPath] {
        &self.search_paths
    }

    /// Rescan every search path and rebuild the pack list. Returns the number
    /// of packs found.
    ///
    /// A search path that cannot be listed, or a manifest that cannot be read
    /// or parsed, is logged and skipped.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self) -> usize {
        let mut packs = Vec::new();

        for search_path in &self.search_paths {
            let manifests = match find_all_packs(self.runtime, &search_path.path) {
                Ok(manifests) => manifests,
                Err(e) => {
                    warn!(
                        "Skipping {} search path {:?}: {:#}",
                        search_path.origin, search_path.path, e
                    );
                    continue;
                }
            };

            for manifest_path in manifests {
                match PackManifest::load(self.runtime, &manifest_path) {
                    Ok(manifest) => {
                        let dir = manifest_path
                            .parent()
                            .map(Path::to_path_buf)
                            .unwrap_or_default();
                        debug!(
                            "Found content pack '{}' ({}) in {:?}",
                            manifest.descriptor.name, manifest.descriptor.project_id, dir
                        );
                        packs.push(DiscoveredPack {
                            descriptor: manifest.descriptor,
                            dependencies: manifest.dependencies,
                            dir,
                            origin: search_path.origin,
                        });
                    }
                    Err(e) => {
                        warn!("Skipping content pack at {:?}: {:#}", manifest_path, e);
                    }
                }
            }
        }

        let count = packs.len();
        self.packs = Some(packs);
        count
    }

    pub fn packs(&self) -> &[DiscoveredPack] {
        self.packs.as_deref().unwrap_or_default()
    }

    /// The current catalog, or `None` before the first refresh.
    pub fn catalog(&self) -> Option<Catalog> {
        self.packs
            .as_ref()
            .map(|packs| packs.iter().map(|p| p.descriptor.clone()).collect())
    }

    /// First discovered pack whose name or project id equals `selector`.
    pub fn find(&self, selector: &str) -> Option<&DiscoveredPack> {
        self.packs()
            .iter()
            .find(|p| p.descriptor.is_selected_by(selector))
    }
}

impl<R: Runtime> CatalogProvider for ContentRegistry<'_, R> {
    fn snapshot(&self) -> Option<Catalog> {
        self.catalog()
    }
}
