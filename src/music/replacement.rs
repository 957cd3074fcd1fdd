//! Replacement table: which music asset is served from which file.
//!
//! Entries come in pairs sharing a tag of the user's choosing:
//!
//! ```toml
//! "hktitletheme.asset" = "Music/HongKong-TitleTheme-UI"
//! "hktitletheme.file" = "../musicpatches/theme.wav"
//! ```

use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::runtime::resolve_relative_path;

const ASSET_SUFFIX: &str = ".asset";
const FILE_SUFFIX: &str = ".file";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplacementDiagnostic {
    #[error("Incorrectly formatted replacement key '{0}', expected '<tag>.asset' or '<tag>.file'")]
    MalformedKey(String),
    #[error("Found file or asset for tag {0} but not both")]
    IncompletePair(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    Asset,
    File,
}

/// Split `<tag>.asset` / `<tag>.file` into the tag and which half it is.
/// The suffix is matched case-insensitively.
fn parse_key(key: &str) -> Option<(&str, KeyKind)> {
    if key.starts_with('.') {
        return None;
    }
    let (tag, suffix) = key.split_at(key.rfind('.')?);
    let kind = if suffix.eq_ignore_ascii_case(ASSET_SUFFIX) {
        KeyKind::Asset
    } else if suffix.eq_ignore_ascii_case(FILE_SUFFIX) {
        KeyKind::File
    } else {
        return None;
    };
    Some((tag, kind))
}

#[derive(Default)]
struct PendingPair {
    asset: Option<String>,
    file: Option<String>,
}

/// Map from asset name (e.g. `Music/HongKong-TitleTheme-UI`) to the file
/// that replaces it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplacementTable {
    entries: BTreeMap<String, PathBuf>,
}

impl ReplacementTable {
    /// Build the table from raw key/value entries. Relative file paths are
    /// resolved against `root`.
    ///
    /// Keys that are not `<tag>.asset` / `<tag>.file` and tags missing one
    /// half are reported and left out.
    pub fn from_entries<I, K, V>(entries: I, root: &Path) -> (Self, Vec<ReplacementDiagnostic>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut diagnostics = Vec::new();
        let mut pairs: BTreeMap<String, PendingPair> = BTreeMap::new();

        for (key, value) in entries {
            let key = key.as_ref();
            let Some((tag, kind)) = parse_key(key) else {
                warn!(
                    "Existence of incorrectly formatted entry key '{}' suggests a badly formed config",
                    key
                );
                diagnostics.push(ReplacementDiagnostic::MalformedKey(key.to_string()));
                continue;
            };

            let pair = pairs.entry(tag.to_string()).or_default();
            let value = Some(value.as_ref().to_string());
            match kind {
                KeyKind::Asset => pair.asset = value,
                KeyKind::File => pair.file = value,
            }
        }

        let mut table = ReplacementTable::default();
        for (tag, pair) in pairs {
            match (pair.asset, pair.file) {
                (Some(asset), Some(file)) => {
                    let path = resolve_relative_path(root, Path::new(&file));
                    debug!("Replacing music asset {} with {:?}", asset, path);
                    table.entries.insert(asset, path);
                }
                _ => {
                    warn!("Found file or asset for tag {} but not both", tag);
                    diagnostics.push(ReplacementDiagnostic::IncompletePair(tag));
                }
            }
        }

        (table, diagnostics)
    }

    pub fn get(&self, asset: &str) -> Option<&Path> {
        self.entries.get(asset).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(asset, path)| (asset.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
