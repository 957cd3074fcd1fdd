use log::{debug, warn};
use std::path::PathBuf;

use crate::{
    inject::ContentPackManager,
    package::{ContentRegistry, PackOrigin},
    runtime::Runtime,
};

mod music;
mod packs;
mod resolve;

pub use music::music;
pub use packs::packs;
pub use resolve::resolve;

/// Build a registry over the given built-in search paths, let the manager
/// append its configured folders, then scan everything.
fn load_registry<'a, R: Runtime>(
    runtime: &'a R,
    search_paths: &[PathBuf],
    manager: &ContentPackManager,
) -> ContentRegistry<'a, R> {
    let mut registry = ContentRegistry::new(runtime);
    for path in search_paths {
        if !runtime.is_dir(path) {
            warn!("Content pack search path {:?} is not a directory", path);
        }
        registry.include_search_path(path.clone(), PackOrigin::Builtin);
    }
    manager.on_refresh_project_list(&mut registry);

    let count = registry.refresh();
    debug!(
        "Found {} content pack(s) in {} search path(s)",
        count,
        registry.search_paths().len()
    );
    registry
}
