use crate::core::mod_file::ModFile;
use crate::models::depend::ModDependency;
use crate::models::loader::LoaderKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sentinel substituted for absent version fields and for unexpanded
/// `${...version...}` template tokens left behind by broken build scripts.
pub const DEFAULT_VERSION: &str = "0.0.0";
pub const DEFAULT_MC_VERSION: &str = "0.0.0";

/// One loader format's normalized view of a package's identity.
///
/// Immutable after construction; the Forge parser's manifest backfill runs
/// before the descriptor is handed to its owning `ModFile`.
#[derive(Serialize, Clone, Debug)]
pub struct ModDescriptor {
    pub loader: LoaderKind,
    pub name: String,
    pub mod_id: String,
    pub version: String,
    pub mc_version: String,
    pub description: String,
    /// Link kind ("homepage", "issues", ...) to URL.
    pub links: BTreeMap<String, String>,
    pub authors: Vec<String>,
    #[serde(skip)]
    pub icon: Option<Vec<u8>>,
    pub dependencies: Vec<ModDependency>,
    /// Alternate ids this package satisfies when depended upon.
    pub provides: Vec<String>,
    /// Jar-in-jar mods declared by this descriptor, owned exclusively by it.
    pub child_mods: Vec<ModFile>,
}

impl ModDescriptor {
    /// Whether this descriptor itself (not counting children) answers to `mod_id`.
    pub fn satisfies(&self, mod_id: &str) -> bool {
        self.mod_id == mod_id || self.provides.iter().any(|p| p == mod_id)
    }
}
