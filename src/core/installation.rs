use crate::core::mod_file::ModFile;
use crate::core::scan::{self, OnMod, OnModsDone};
use crate::models::error::MvError;
use crate::models::loader::LoaderKind;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// Sentinel used when the companion descriptor gives no usable game version.
pub const UNKNOWN_MC_VERSION: &str = "unknown";

/// One game installation: a per-version directory with an optional
/// same-named companion JSON descriptor and a `mods` subdirectory.
///
/// The mod list is loaded lazily on first access and cached; `reload_mods`
/// invalidates and repopulates it. All methods assume single-threaded use.
#[derive(Debug)]
pub struct GameInstallation {
    pub dir_name: String,
    pub path: Utf8PathBuf,
    pub kind: LoaderKind,
    pub mc_version: String,
    mods: Option<Vec<ModFile>>,
}

impl GameInstallation {
    /// Builds an installation model from a version directory.
    ///
    /// Classification reads the companion descriptor's `mainClass` field and
    /// matches its prefix against the known loader namespaces. This is a
    /// best-effort heuristic: no companion file, or an unrecognized prefix,
    /// yields `Other` with an unknown version. An unreadable companion file
    /// is an error (the caller's scan skips the directory).
    pub fn create(version_dir: &Utf8Path) -> Result<Self, MvError> {
        let abs = dunce::canonicalize(version_dir.as_std_path())?;
        let abs = Utf8PathBuf::from_path_buf(abs)
            .map_err(|p| MvError::Unexpected(Some(format!("non-UTF-8 path: {}", p.display()))))?;
        let dir_name = abs
            .file_name()
            .ok_or_else(|| MvError::Unexpected(Some(format!("no directory name in {}", abs))))?
            .to_string();

        let mut result = Self {
            dir_name: dir_name.clone(),
            path: abs.clone(),
            kind: LoaderKind::Other,
            mc_version: UNKNOWN_MC_VERSION.to_string(),
            mods: None,
        };

        let companion = abs.join(format!("{}.json", dir_name));
        if !companion.exists() {
            return Ok(result);
        }

        let root: Value = serde_json::from_str(&std::fs::read_to_string(&companion)?)?;
        let main_class = root
            .get("mainClass")
            .and_then(Value::as_str)
            .unwrap_or_default();
        result.kind = if main_class.starts_with("cpw.mods.") {
            LoaderKind::Forge
        } else if main_class.starts_with("net.fabricmc.") {
            LoaderKind::Fabric
        } else if main_class.starts_with("org.quiltmc.") {
            LoaderKind::Quilt
        } else if main_class.starts_with("net.minecraft.client.") {
            LoaderKind::Vanilla
        } else {
            return Ok(result);
        };

        result.mc_version = Self::read_mc_version(&root);
        Ok(result)
    }

    /// `clientVersion` when present; some launchers only record the version
    /// inside the `patches` list under the `game` entry.
    fn read_mc_version(root: &Value) -> String {
        if let Some(version) = root.get("clientVersion").and_then(Value::as_str) {
            return version.to_string();
        }
        if let Some(patches) = root.get("patches").and_then(Value::as_array) {
            for patch in patches {
                if patch.get("id").and_then(Value::as_str) == Some("game") {
                    if let Some(version) = patch.get("version").and_then(Value::as_str) {
                        return version.to_string();
                    }
                }
            }
        }
        UNKNOWN_MC_VERSION.to_string()
    }

    pub fn mods_dir(&self) -> Utf8PathBuf {
        self.path.join("mods")
    }

    /// The cached mod list, loading it first if this is the first access.
    pub fn mods_or_load(&mut self) -> &[ModFile] {
        if self.mods.is_none() {
            self.reload_mods(None, None);
        }
        self.mods.as_deref().unwrap_or_default()
    }

    /// The cached mod list as-is; empty if nothing was loaded yet.
    /// Query helpers below read this view; go through
    /// [`mods_or_load`](Self::mods_or_load) first.
    pub fn mods(&self) -> &[ModFile] {
        self.mods.as_deref().unwrap_or_default()
    }

    /// Discards the cache and re-scans the `mods` subdirectory.
    pub fn reload_mods(&mut self, on_one: Option<OnMod<'_>>, on_done: Option<OnModsDone<'_>>) {
        self.mods = Some(scan::load_mods(&self.mods_dir(), on_one, on_done));
    }

    /// Whether any loaded mod satisfies `mod_id`: directly, through a
    /// provided id, or through a nested mod file.
    pub fn has_mod_by_id(&self, mod_id: &str) -> bool {
        self.mod_by_id(mod_id).is_some()
    }

    /// The top-level mod file satisfying `mod_id`, if any.
    pub fn mod_by_id(&self, mod_id: &str) -> Option<&ModFile> {
        self.mods()
            .iter()
            .find(|m| m.includes_id(mod_id, None))
    }

    /// File-name-only presence test (case-insensitive); no metadata involved.
    pub fn has_mod_by_file(&self, file_name: &str) -> bool {
        self.mods()
            .iter()
            .any(|m| m.file_name().eq_ignore_ascii_case(file_name))
    }

    /// Copies `mod_file` into this installation's `mods` directory and
    /// appends the re-parsed copy to the cached list.
    pub fn add_mod(&mut self, mod_file: &ModFile) -> Result<(), MvError> {
        self.mods_or_load();
        let mods_dir = self.mods_dir();
        std::fs::create_dir_all(&mods_dir)?;
        let new_mod = mod_file.copy_to(&mods_dir)?;
        if let Some(list) = self.mods.as_mut() {
            list.push(new_mod);
        }
        Ok(())
    }

    /// Deletes `mod_file`'s archive and drops it from the cached list.
    /// Removing a mod that is not in the cache is a silent no-op.
    pub fn remove_mod(&mut self, mod_file: &ModFile) -> Result<(), MvError> {
        self.mods_or_load();
        let Some(list) = self.mods.as_mut() else {
            return Ok(());
        };
        let Some(position) = list.iter().position(|m| m == mod_file) else {
            return Ok(());
        };
        list[position].delete_file()?;
        list.remove(position);
        Ok(())
    }
}
