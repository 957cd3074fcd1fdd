//! Content pack discovery
//!
//! This module provides the package identity types, the `pack.json` record,
//! search-path scanning, and the registry that turns search paths into a
//! catalog for the injector.

mod catalog;
mod descriptor;
mod discovery;
mod manifest;
mod registry;

pub use catalog::{Catalog, CatalogProvider};
#[cfg(test)]
pub use catalog::MockCatalogProvider;
pub use descriptor::{PackageDescriptor, PackageReference};
pub use discovery::find_all_packs;
pub use manifest::{MANIFEST_FILE, PackManifest};
pub use registry::{ContentRegistry, DiscoveredPack, PackOrigin, SearchPath};
