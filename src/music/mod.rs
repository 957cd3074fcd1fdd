//! Music asset replacement
//!
//! Configured `<tag>.asset` / `<tag>.file` pairs become a
//! [`ReplacementTable`]; [`MusicPatcher`] consults it whenever the engine
//! loads a `Music/` asset.

mod patcher;
mod replacement;

pub use patcher::{
    AudioClip, ClipLoader, MUSIC_PREFIX, MusicPatcher, PREFAB_SUFFIX, is_music_asset_path,
    prefab_hint,
};
pub use replacement::{ReplacementDiagnostic, ReplacementTable};
