//! Lexical path helpers. Nothing here touches the file system.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
///
/// A `..` that would climb above the start of a relative path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let climbs_out = matches!(
                    result.components().next_back(),
                    None | Some(Component::ParentDir)
                );
                if climbs_out {
                    if !result.has_root() {
                        result.push(component);
                    }
                } else {
                    result.pop();
                }
            }
            _ => result.push(component),
        }
    }
    result
}

/// Resolve a user-supplied path against `root`.
///
/// Paths that carry a root (`/music/a.wav`, `C:\music\a.wav`, or `\music\a.wav`
/// on Windows) are returned unchanged. Anything else is joined onto `root` and
/// normalized, so `../musicpatches/theme.wav` under `/game/BepInEx/config`
/// becomes `/game/BepInEx/musicpatches/theme.wav`.
pub fn resolve_relative_path(root: &Path, path: &Path) -> PathBuf {
    if path.has_root() || path.is_absolute() {
        path.to_path_buf()
    } else {
        normalize_path(&root.join(path))
    }
}
