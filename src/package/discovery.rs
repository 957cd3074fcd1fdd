use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

use super::manifest::MANIFEST_FILE;

/// Find every pack manifest directly under a search path.
///
/// Directory structure: `<search_path>/<pack>/pack.json`
///
/// Pack directories are visited in lexical order so the resulting catalog
/// order does not depend on the platform's directory listing order.
#[tracing::instrument(skip(runtime, search_path))]
pub fn find_all_packs<R: Runtime>(runtime: &R, search_path: &Path) -> Result<Vec<PathBuf>> {
    let mut manifests = Vec::new();

    if !runtime.exists(search_path) {
        return Ok(manifests);
    }

    let mut entries = runtime.read_dir(search_path)?;
    entries.sort();

    for pack_path in entries {
        if runtime.is_dir(&pack_path) {
            let manifest_path = pack_path.join(MANIFEST_FILE);
            if runtime.exists(&manifest_path) {
                manifests.push(manifest_path);
            }
        }
    }

    Ok(manifests)
}
