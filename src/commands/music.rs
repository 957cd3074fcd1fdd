use anyhow::Result;

use crate::{config::Config, music::ReplacementTable, runtime::Runtime};

/// Show the configured music replacements, or the one for `asset`
#[tracing::instrument(skip(runtime, config))]
pub fn music<R: Runtime>(runtime: R, config: &Config, asset: Option<&str>) -> Result<()> {
    let music = &config.music_patcher;
    // Problems with individual entries are already logged by the table.
    let (table, _) = ReplacementTable::from_entries(&music.replacements, &music.asset_root());

    if !music.enabled {
        println!("Music patcher is disabled.");
    }

    match asset {
        Some(asset) => match table.get(asset) {
            Some(path) => println!("{}", format_replacement(&runtime, asset, path)),
            None => println!("No replacement for {}", asset),
        },
        None => {
            if table.is_empty() {
                println!("No music replacements configured.");
            }
            for (asset, path) in table.iter() {
                println!("{}", format_replacement(&runtime, asset, path));
            }
        }
    }

    Ok(())
}

fn format_replacement<R: Runtime>(runtime: &R, asset: &str, path: &std::path::Path) -> String {
    if runtime.exists(path) {
        format!("{} -> {}", asset, path.display())
    } else {
        format!("{} -> {} (missing)", asset, path.display())
    }
}
