//! Music asset load interception.
//!
//! The engine's generic asset loader is wrapped so that `Music/...` requests
//! with a configured replacement are served from a file on disk instead.
//! Decoding the file is the [`ClipLoader`]'s business.

use anyhow::Result;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use super::{ReplacementDiagnostic, ReplacementTable};
use crate::config::MusicPatcherConfig;

pub const MUSIC_PREFIX: &str = "Music/";
pub const PREFAB_SUFFIX: &str = "-Prefab";

/// True for `Music/<name>` requests that can be replaced. Prefab requests
/// wrap a clip rather than being one, so they are left alone.
pub fn is_music_asset_path(path: &str) -> bool {
    path.len() > MUSIC_PREFIX.len()
        && path.starts_with(MUSIC_PREFIX)
        && !path.ends_with(PREFAB_SUFFIX)
}

/// For a prefab request, the asset name a replacement should use instead.
pub fn prefab_hint(path: &str) -> Option<&str> {
    path.strip_suffix(PREFAB_SUFFIX)
}

/// Decoded clip data.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub name: String,
    pub channels: u16,
    pub frequency: u32,
    /// Interleaved samples, shared between clones
    pub samples: Arc<[f32]>,
}

/// Turns a file on disk into a clip.
#[cfg_attr(test, mockall::automock)]
pub trait ClipLoader: Send + Sync {
    fn load_clip(&self, path: &Path) -> Result<AudioClip>;
}

pub struct MusicPatcher<L: ClipLoader> {
    loader: L,
    table: ReplacementTable,
    enabled: bool,
    log_requests: bool,
    cache: Mutex<HashMap<String, AudioClip>>,
}

impl<L: ClipLoader> MusicPatcher<L> {
    pub fn new(loader: L, table: ReplacementTable) -> Self {
        Self {
            loader,
            table,
            enabled: true,
            log_requests: false,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Build a patcher from the `[music_patcher]` section. Problems in the
    /// replacement entries are returned alongside; they never prevent the
    /// patcher from being built.
    pub fn from_config(loader: L, config: &MusicPatcherConfig) -> (Self, Vec<ReplacementDiagnostic>) {
        let (table, diagnostics) =
            ReplacementTable::from_entries(&config.replacements, &config.asset_root());
        let patcher = Self {
            enabled: config.enabled,
            log_requests: config.log_music_assets_requested,
            ..Self::new(loader, table)
        };
        (patcher, diagnostics)
    }

    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// Hook: runs after the engine's asset loader. Returns the replacement
    /// clip for `path` when there is one, otherwise `original` untouched.
    pub fn intercept_load(&self, path: &str, original: Option<AudioClip>) -> Option<AudioClip> {
        if !self.enabled {
            return original;
        }
        self.log_request(path);
        if !is_music_asset_path(path) {
            return original;
        }

        match self.replacement_for(path) {
            Some(clip) => Some(clip),
            None => original,
        }
    }

    /// The replacement clip for `path`, loading and caching it on first use.
    pub fn replacement_for(&self, path: &str) -> Option<AudioClip> {
        let file = self.table.get(path)?;

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(clip) = cache.get(path) {
            return Some(clip.clone());
        }

        match self.loader.load_clip(file) {
            Ok(mut clip) => {
                clip.name = path.strip_prefix(MUSIC_PREFIX).unwrap_or(path).to_string();
                cache.insert(path.to_string(), clip.clone());
                Some(clip)
            }
            Err(e) => {
                warn!("Unable to load replacement {:?} for {}: {:#}", file, path, e);
                None
            }
        }
    }

    fn log_request(&self, path: &str) {
        if !self.log_requests || !path.starts_with(MUSIC_PREFIX) {
            return;
        }
        match prefab_hint(path) {
            Some(asset) => info!(
                "Music asset requested: {} (prefab; to replace it use <tag>.asset = {})",
                path, asset
            ),
            None => info!("Music asset requested: {}", path),
        }
    }
}
