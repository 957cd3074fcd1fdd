//! Configuration file for both features.
//!
//! ```toml
//! [content_pack_manager]
//! enabled = true
//! appended_content_pack_folders = ["../MyContentPacks"]
//! content_pack_injections = ["Portraits", "Voices=Dragonfall,hk-001"]
//! log_content_pack_names_resolved = false
//!
//! [music_patcher]
//! enabled = true
//! log_music_assets_requested = false
//!
//! [music_patcher.replacements]
//! "hktitletheme.asset" = "Music/HongKong-TitleTheme-UI"
//! "hktitletheme.file" = "../musicpatches/theme.wav"
//! ```
//!
//! Relative folders and `asset_root` are resolved against the directory the
//! config file lives in.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::runtime::{Runtime, resolve_relative_path};

/// Directory under the platform config dir that holds `config.toml`.
pub const CONFIG_DIR_NAME: &str = "cpinject";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub content_pack_manager: ContentPackManagerConfig,
    pub music_patcher: MusicPatcherConfig,

    /// File this config was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ContentPackManagerConfig {
    /// Main switch for search-path appending and dependency injection
    pub enabled: bool,
    /// Extra folders to search for content packs, placed after the built-in ones
    pub appended_content_pack_folders: Vec<PathBuf>,
    /// Injection rules: `<pack>` or `<pack>=<target1>,<target2>,...`
    pub content_pack_injections: Vec<String>,
    /// Log each content pack name as its dependencies are resolved
    pub log_content_pack_names_resolved: bool,
}

impl Default for ContentPackManagerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            appended_content_pack_folders: Vec::new(),
            content_pack_injections: Vec::new(),
            log_content_pack_names_resolved: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MusicPatcherConfig {
    pub enabled: bool,
    /// Log every `Music/` asset request, to help find asset names
    pub log_music_assets_requested: bool,
    /// Root for relative `.file` paths; defaults to the config file's directory
    pub asset_root: Option<PathBuf>,
    /// `<tag>.asset` / `<tag>.file` pairs
    pub replacements: BTreeMap<String, String>,
}

impl Default for MusicPatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_music_assets_requested: false,
            asset_root: None,
            replacements: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse a config file. Relative paths inside it are resolved against the
    /// file's directory.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.resolve_paths(base);
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load the config the CLI should use.
    ///
    /// An explicit path must exist. Without one, `<config_dir>/cpinject/config.toml`
    /// is used when present, otherwise the defaults.
    pub fn locate<R: Runtime>(runtime: &R, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(runtime, path);
        }

        if let Some(config_dir) = runtime.config_dir() {
            let path = Self::default_path(&config_dir);
            if runtime.exists(&path) {
                return Self::load(runtime, &path);
            }
            debug!("No config file at {:?}, using defaults", path);
        }

        Ok(Self::default())
    }

    pub fn default_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for folder in &mut self.content_pack_manager.appended_content_pack_folders {
            *folder = resolve_relative_path(base, folder);
        }
        let asset_root = self
            .music_patcher
            .asset_root
            .as_deref()
            .map_or_else(|| base.to_path_buf(), |root| resolve_relative_path(base, root));
        self.music_patcher.asset_root = Some(asset_root);
    }
}

impl MusicPatcherConfig {
    /// Root for relative replacement paths. Falls back to the current
    /// directory when no config file was involved.
    pub fn asset_root(&self) -> PathBuf {
        self.asset_root.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
