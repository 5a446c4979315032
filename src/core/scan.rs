use crate::core::installation::GameInstallation;
use crate::core::mod_file::{ModFile, DISABLED_SUFFIX, ENABLED_SUFFIX};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

/// Per-item callback invoked synchronously, in listing order.
pub type OnMod<'a> = &'a mut dyn FnMut(&ModFile);
pub type OnModsDone<'a> = &'a mut dyn FnMut(&[ModFile]);
pub type OnGame<'a> = &'a mut dyn FnMut(&GameInstallation);
pub type OnGamesDone<'a> = &'a mut dyn FnMut(&[GameInstallation]);

/// Loads every mod archive directly inside `root`.
///
/// Only files named `*.jar` or `*.jar.disabled` (case-insensitive) are
/// candidates; anything that fails to construct is skipped silently apart
/// from a log line. A missing directory yields an empty list, not an error.
/// `on_done` is always invoked exactly once, `on_one` once per success.
pub fn load_mods(
    root: &Utf8Path,
    mut on_one: Option<OnMod<'_>>,
    on_done: Option<OnModsDone<'_>>,
) -> Vec<ModFile> {
    let mut result: Vec<ModFile> = Vec::new();
    if !root.is_dir() {
        if let Some(done) = on_done {
            done(&result);
        }
        return result;
    }

    for path in sorted_entries(root) {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let lower = file_name.to_lowercase();
        if !(lower.ends_with(ENABLED_SUFFIX) || lower.ends_with(DISABLED_SUFFIX)) {
            continue;
        }

        match ModFile::create(&path) {
            Ok(mod_file) => {
                if let Some(one) = on_one.as_mut() {
                    one(&mod_file);
                }
                result.push(mod_file);
            }
            Err(e) => debug!("skipping {}: {}", path, e),
        }
    }

    if let Some(done) = on_done {
        done(&result);
    }
    result
}

/// Loads every game installation directly inside `root` (one per
/// subdirectory), with the same callback contract as [`load_mods`].
pub fn load_games(
    root: &Utf8Path,
    mut on_one: Option<OnGame<'_>>,
    on_done: Option<OnGamesDone<'_>>,
) -> Vec<GameInstallation> {
    let mut result: Vec<GameInstallation> = Vec::new();
    if !root.is_dir() {
        if let Some(done) = on_done {
            done(&result);
        }
        return result;
    }

    for path in sorted_entries(root) {
        if !path.is_dir() {
            continue;
        }
        match GameInstallation::create(&path) {
            Ok(game) => {
                if let Some(one) = on_one.as_mut() {
                    one(&game);
                }
                result.push(game);
            }
            Err(e) => warn!("skipping game directory {}: {}", path, e),
        }
    }

    if let Some(done) = on_done {
        done(&result);
    }
    result
}

/// Immediate entries of a directory, name-sorted so listing order (and with
/// it callback order) is deterministic across platforms.
fn sorted_entries(root: &Utf8Path) -> Vec<Utf8PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    let mut paths: Vec<Utf8PathBuf> = entries
        .flatten()
        .filter_map(|entry| Utf8PathBuf::from_path_buf(entry.path()).ok())
        .collect();
    paths.sort();
    paths
}
