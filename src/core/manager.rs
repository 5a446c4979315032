use crate::config::AppConfig;
use crate::core::installation::GameInstallation;
use crate::core::mod_file::ModFile;
use crate::core::scan::{self, OnGame, OnGamesDone, OnMod, OnModsDone};
use crate::models::error::MvError;

/// Repository-level aggregate: the local mod library plus the game
/// installations discovered under the configured versions directory.
///
/// Constructed from an explicit [`AppConfig`]; there is no ambient global.
pub struct ModManager {
    config: AppConfig,
    local_mods: Option<Vec<ModFile>>,
    games: Option<Vec<GameInstallation>>,
}

impl ModManager {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            local_mods: None,
            games: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mods in the local repository, loading them on first access.
    pub fn local_mods_or_load(&mut self) -> &[ModFile] {
        if self.local_mods.is_none() {
            self.reload_local_mods(None, None);
        }
        self.local_mods.as_deref().unwrap_or_default()
    }

    /// Discovered installations, loading them on first access. Mutable so
    /// callers can drive each installation's own lazy mod cache.
    pub fn games_or_load(&mut self) -> &mut [GameInstallation] {
        if self.games.is_none() {
            self.reload_games(None, None);
        }
        self.games.as_deref_mut().unwrap_or_default()
    }

    pub fn reload_local_mods(&mut self, on_one: Option<OnMod<'_>>, on_done: Option<OnModsDone<'_>>) {
        self.local_mods = Some(scan::load_mods(&self.config.local_mods_dir, on_one, on_done));
    }

    pub fn reload_games(&mut self, on_one: Option<OnGame<'_>>, on_done: Option<OnGamesDone<'_>>) {
        self.games = Some(scan::load_games(
            &self.config.game_version_dir,
            on_one,
            on_done,
        ));
    }

    /// Copies a mod file into the local repository, enables it, and returns
    /// the stored entry. Adding a mod already in the repository returns the
    /// existing entry untouched.
    pub fn add_mod(&mut self, mod_file: &ModFile) -> Result<&ModFile, MvError> {
        self.local_mods_or_load();
        let list = self.local_mods.get_or_insert_with(Vec::new);
        if let Some(position) = list.iter().position(|m| m == mod_file) {
            return Ok(&list[position]);
        }

        std::fs::create_dir_all(&self.config.local_mods_dir)?;
        let mut new_mod = mod_file.copy_to(&self.config.local_mods_dir)?;
        new_mod.set_enabled(true)?;
        list.push(new_mod);
        list.last().ok_or(MvError::Unexpected(None))
    }
}
