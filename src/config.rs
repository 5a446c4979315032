use camino::Utf8PathBuf;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "mod_vault";

/// Persisted application settings.
///
/// Constructed explicitly and handed to [`ModManager`](crate::core::manager::ModManager);
/// the core never reads an ambient global.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u8,
    /// Directory holding the per-version game installation folders.
    pub game_version_dir: Utf8PathBuf,
    /// Directory holding the local mod repository.
    pub local_mods_dir: Utf8PathBuf,
    /// UI scale factor for the shells; the core only stores it.
    pub ui_scale: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let base = ProjectDirs::from("com", "rika", APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe_path| exe_path.parent().map(|p| p.to_path_buf()))
            })
            .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
            .unwrap_or_else(|| Utf8PathBuf::from("."));

        Self {
            version: 0,
            game_version_dir: Utf8PathBuf::from("./.minecraft/versions"),
            local_mods_dir: base.join("local_mods"),
            ui_scale: 1.0,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<AppConfig, confy::ConfyError> {
        confy::load(APP_NAME, None)
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, None, self)
    }

    /// Applies the UI scale factor to a pixel size.
    pub fn scaled(&self, size: u32) -> u32 {
        (size as f64 * self.ui_scale) as u32
    }
}
