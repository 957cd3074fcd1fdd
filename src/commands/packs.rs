use anyhow::Result;
use std::path::PathBuf;

use crate::{
    config::Config,
    inject::ContentPackManager,
    package::DiscoveredPack,
    runtime::Runtime,
};

use super::load_registry;

/// List every content pack reachable from the search paths
#[tracing::instrument(skip(runtime, config))]
pub fn packs<R: Runtime>(runtime: R, config: &Config, search_paths: &[PathBuf]) -> Result<()> {
    let manager = ContentPackManager::new(&config.content_pack_manager);
    let registry = load_registry(&runtime, search_paths, &manager);

    if registry.packs().is_empty() {
        println!("No content packs found.");
        return Ok(());
    }

    for pack in registry.packs() {
        println!("{}", format_pack(pack));
    }

    Ok(())
}

fn format_pack(pack: &DiscoveredPack) -> String {
    let version = if pack.descriptor.version.is_empty() {
        "(unknown)"
    } else {
        pack.descriptor.version.as_str()
    };
    format!(
        "{}  {}  {}  [{}]",
        pack.descriptor.name, pack.descriptor.project_id, version, pack.origin
    )
}
