use crate::core::archive::ModArchive;
use crate::core::descriptor::ModDescriptor;
use crate::core::parser::PARSERS;
use crate::models::error::MvError;
use crate::models::loader::LoaderKind;
use crate::utils::file as file_util;
use crate::utils::icon;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{error, warn};

pub const ENABLED_SUFFIX: &str = ".jar";
pub const DISABLED_SUFFIX: &str = ".jar.disabled";

/// Aggregate root for one mod archive.
///
/// Holds one descriptor per loader format the archive supports (several when
/// the same jar advertises itself to multiple loaders), and through those
/// descriptors any nested jar-in-jar mods. Identity for equality and
/// hashing is the full path, not parsed content.
#[derive(Serialize, Clone, Debug)]
pub struct ModFile {
    path: Utf8PathBuf,
    pub descriptors: Vec<ModDescriptor>,
    /// Full path chain of the enclosing archive when this file is nested.
    /// A chain string instead of a pointer, so ownership stays a strict tree.
    parent_path: Option<String>,
}

impl ModFile {
    /// Opens and parses a mod archive on disk. The stored path is absolute.
    pub fn create(path: &Utf8Path) -> Result<Self, MvError> {
        if !path.is_file() {
            return Err(MvError::FileOrDirectoryNotFound(path.to_string()));
        }
        let abs = dunce::canonicalize(path.as_std_path())?;
        let abs = Utf8PathBuf::from_path_buf(abs)
            .map_err(|p| MvError::Unexpected(Some(format!("non-UTF-8 path: {}", p.display()))))?;
        let bytes = std::fs::read(&abs)?;
        Self::from_bytes(bytes, abs, None)
    }

    /// Parses a mod archive from raw bytes. Used for files on disk (via
    /// [`create`](Self::create)) and for nested jars that only exist inside
    /// another archive's entry.
    ///
    /// Every supported format is tried; a failure in one parser skips just
    /// that format. Zero resulting descriptors means the archive is unusable
    /// and no `ModFile` is built.
    pub fn from_bytes(
        bytes: Vec<u8>,
        path: impl Into<Utf8PathBuf>,
        parent_path: Option<String>,
    ) -> Result<Self, MvError> {
        let mut archive = ModArchive::from_bytes(bytes)?;
        let mut result = Self {
            path: path.into(),
            descriptors: Vec::new(),
            parent_path,
        };

        for parser in PARSERS {
            if !parser.supported(&archive) {
                continue;
            }
            match parser.parse(&mut archive, &result.full_path()) {
                Ok(descriptor) => result.descriptors.push(descriptor),
                Err(e) => error!(
                    "failed to parse {} as a {} mod: {}",
                    result.full_path(),
                    parser.loader(),
                    e
                ),
            }
        }

        if result.descriptors.is_empty() {
            warn!(
                "no usable mod metadata in {}, ignoring this file",
                result.full_path()
            );
            return Err(MvError::UnusableArchive(result.full_path()));
        }
        Ok(result)
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }

    pub fn is_nested(&self) -> bool {
        self.parent_path.is_some()
    }

    /// Full path; for nested files the enclosing chain joined with `:`.
    pub fn full_path(&self) -> String {
        match &self.parent_path {
            Some(parent) => format!("{}:{}", parent, self.path),
            None => self.path.to_string(),
        }
    }

    /// Distinct display names across descriptors, in descriptor order.
    pub fn names(&self) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        for descriptor in &self.descriptors {
            if !result.contains(&descriptor.name) {
                result.push(descriptor.name.clone());
            }
        }
        result
    }

    /// Distinct mod ids across descriptors, in descriptor order.
    pub fn ids(&self) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        for descriptor in &self.descriptors {
            if !result.contains(&descriptor.mod_id) {
                result.push(descriptor.mod_id.clone());
            }
        }
        result
    }

    pub fn supported_loaders(&self) -> Vec<LoaderKind> {
        self.descriptors.iter().map(|d| d.loader).collect()
    }

    pub fn descriptor_for(&self, loader: LoaderKind) -> Option<&ModDescriptor> {
        self.descriptors.iter().find(|d| d.loader == loader)
    }

    /// Whether any identity in this file's tree answers to `mod_id`: a
    /// descriptor's own id, one of its provided ids, or (recursively) any
    /// nested mod file. `only` restricts the search to one loader format.
    pub fn includes_id(&self, mod_id: &str, only: Option<LoaderKind>) -> bool {
        self.find_included(mod_id, only).is_some()
    }

    /// Like [`includes_id`](Self::includes_id) but returns the file that
    /// satisfies the id (which may be a nested file deep in the tree).
    pub fn find_included(&self, mod_id: &str, only: Option<LoaderKind>) -> Option<&ModFile> {
        match only {
            Some(loader) => self
                .descriptor_for(loader)
                .and_then(|d| self.find_in_descriptor(d, mod_id)),
            None => self
                .descriptors
                .iter()
                .find_map(|d| self.find_in_descriptor(d, mod_id)),
        }
    }

    fn find_in_descriptor<'a>(
        &'a self,
        descriptor: &'a ModDescriptor,
        mod_id: &str,
    ) -> Option<&'a ModFile> {
        if descriptor.satisfies(mod_id) {
            return Some(self);
        }
        // Children declared by a fabric descriptor are searched as fabric
        // mods, and so on for the other loaders.
        descriptor
            .child_mods
            .iter()
            .find_map(|child| child.find_included(mod_id, Some(descriptor.loader)))
    }

    /// Case-insensitive substring search over name, id and description of the
    /// (optionally loader-filtered) descriptor set.
    pub fn matches_search(&self, keyword: &str, only: Option<LoaderKind>) -> bool {
        let mut content: Vec<&str> = Vec::new();
        for descriptor in &self.descriptors {
            if only.is_some_and(|loader| descriptor.loader != loader) {
                continue;
            }
            content.push(&descriptor.name);
            content.push(&descriptor.mod_id);
            content.push(&descriptor.description);
        }
        content.join(",").to_lowercase().contains(&keyword.to_lowercase())
    }

    /// Enabled state is structural: `.jar` is enabled, `.jar.disabled` is not.
    pub fn enabled(&self) -> bool {
        self.path.as_str().ends_with(ENABLED_SUFFIX)
    }

    /// Toggles enabled state by renaming the underlying file. Setting the
    /// already-current state performs no rename and no filesystem call.
    pub fn set_enabled(&mut self, value: bool) -> Result<(), MvError> {
        if value == self.enabled() {
            return Ok(());
        }
        let stem = file_util::clear_path_suffix(self.path.as_str(), &["jar", "disable", "disabled"]);
        let suffix = if value { ENABLED_SUFFIX } else { DISABLED_SUFFIX };
        self.rename_to(Utf8PathBuf::from(format!("{}{}", stem, suffix)))
    }

    /// Moves the underlying file and updates the stored path.
    pub fn rename_to(&mut self, target: Utf8PathBuf) -> Result<(), MvError> {
        if let Some(parent) = &self.parent_path {
            return Err(MvError::NestedMod(format!("{}:{}", parent, self.path)));
        }
        std::fs::rename(&self.path, &target)?;
        self.path = target;
        Ok(())
    }

    /// Copies the archive into `target_dir` and parses the copy from scratch:
    /// the result reflects exactly what parsing produces for the new file,
    /// not a structural clone. Name collisions get an incrementing numeric
    /// prefix. Only legal on a non-nested file.
    pub fn copy_to(&self, target_dir: &Utf8Path) -> Result<ModFile, MvError> {
        if self.parent_path.is_some() {
            return Err(MvError::NestedMod(self.full_path()));
        }
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| MvError::Unexpected(Some(format!("no file name in {}", self.path))))?;
        let target = file_util::unique_target_path(target_dir, file_name);
        std::fs::copy(&self.path, &target)?;
        Self::create(&target)
    }

    /// Deletes the underlying archive file.
    pub fn delete_file(&self) -> Result<(), MvError> {
        if self.parent_path.is_some() {
            return Err(MvError::NestedMod(self.full_path()));
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    /// First icon found across descriptors.
    pub fn icon(&self) -> Option<&[u8]> {
        self.descriptors
            .iter()
            .find_map(|d| d.icon.as_deref())
    }

    /// Icon as a `data:` URI, for shells that render straight into a web view.
    pub fn icon_data_uri(&self) -> Option<String> {
        icon::to_data_uri(self.icon()?)
    }
}

impl PartialEq for ModFile {
    fn eq(&self, other: &Self) -> bool {
        self.full_path() == other.full_path()
    }
}

impl Eq for ModFile {}

impl std::hash::Hash for ModFile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.full_path().hash(state);
    }
}
