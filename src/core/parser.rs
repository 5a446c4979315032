pub mod fabric;
pub mod forge;
pub mod quilt;

use crate::core::archive::ModArchive;
use crate::core::descriptor::ModDescriptor;
use crate::core::mod_file::ModFile;
use crate::models::error::MvError;
use crate::models::loader::LoaderKind;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Fixed descriptor entry paths. These are a byte-for-byte compatibility
/// contract with the three loader ecosystems.
pub const FABRIC_DESCRIPTOR: &str = "fabric.mod.json";
pub const QUILT_DESCRIPTOR: &str = "quilt.mod.json";
pub const FORGE_DESCRIPTOR: &str = "META-INF/mods.toml";
pub const JAR_MANIFEST: &str = "META-INF/MANIFEST.MF";

/// The closed set of metadata parsers. Adding a loader ecosystem means adding
/// a variant here and an arm to each match below; there is no open-ended
/// plugin registry because nothing needs one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModParser {
    Fabric,
    Quilt,
    Forge,
}

/// Try-each-keep-successes iteration order used by `ModFile` construction.
pub const PARSERS: [ModParser; 3] = [ModParser::Fabric, ModParser::Quilt, ModParser::Forge];

impl ModParser {
    pub fn loader(&self) -> LoaderKind {
        match self {
            ModParser::Fabric => LoaderKind::Fabric,
            ModParser::Quilt => LoaderKind::Quilt,
            ModParser::Forge => LoaderKind::Forge,
        }
    }

    /// Pure detection, decoupled from parsing so each side can be tested alone.
    pub fn supported(&self, archive: &ModArchive) -> bool {
        match self {
            ModParser::Fabric => archive.has_entry(FABRIC_DESCRIPTOR),
            ModParser::Quilt => archive.has_entry(QUILT_DESCRIPTOR),
            ModParser::Forge => archive.has_entry(FORGE_DESCRIPTOR),
        }
    }

    /// Extracts this format's descriptor from the archive. `owner_path` is the
    /// full path chain of the file being parsed, used for diagnostics and as
    /// the parent reference of any nested mods.
    pub fn parse(
        &self,
        archive: &mut ModArchive,
        owner_path: &str,
    ) -> Result<ModDescriptor, MvError> {
        info!("parsing {} mod: {}", self.loader(), owner_path);
        let result = match self {
            ModParser::Fabric => fabric::parse(archive, owner_path),
            ModParser::Quilt => quilt::parse(archive, owner_path),
            ModParser::Forge => forge::parse(archive, owner_path),
        }?;
        if result.mod_id.is_empty() {
            return Err(MvError::MissingSection(format!(
                "mod id in {} descriptor",
                self.loader()
            )));
        }
        info!("parsed {} mod: {}", self.loader(), owner_path);
        Ok(result)
    }
}

/// Decodes an embedded JSON descriptor, retrying once with raw line breaks
/// inside the document flattened to spaces. Several real-world mods ship
/// descriptions containing literal newlines inside string literals, which
/// strict JSON rejects.
pub(crate) fn decode_lenient_json(raw: &[u8]) -> Result<Map<String, Value>, MvError> {
    let value: Value = match serde_json::from_slice(raw) {
        Ok(v) => v,
        Err(_) => {
            let flattened: Vec<u8> = raw
                .iter()
                .map(|&b| if b == b'\n' || b == b'\r' { b' ' } else { b })
                .collect();
            serde_json::from_slice(&flattened)?
        }
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(MvError::MalformedDocument(
            "descriptor root is not an object".to_string(),
        )),
    }
}

/// Reads an icon entry from the same archive the descriptor came from.
/// Any failure (missing entry, bad path) yields "no icon", never an error.
pub(crate) fn read_icon(
    archive: &mut ModArchive,
    icon_path: Option<&str>,
    owner_path: &str,
) -> Option<Vec<u8>> {
    let path = icon_path?;
    match archive.read_entry(path) {
        Ok(bytes) => Some(bytes),
        Err(_) => {
            info!("failed to open icon {} in {}", path, owner_path);
            None
        }
    }
}

/// Parses the nested jar entries a descriptor declares, skipping any that
/// cannot be read or that yield no usable metadata of their own.
pub(crate) fn parse_child_mods(
    archive: &mut ModArchive,
    jar_entries: &[String],
    owner_path: &str,
) -> Vec<ModFile> {
    if !jar_entries.is_empty() {
        info!(
            "resolving {} nested mod(s) inside {}",
            jar_entries.len(),
            owner_path
        );
    }

    let mut result = Vec::new();
    for entry in jar_entries {
        if entry.is_empty() {
            continue;
        }
        let bytes = match archive.read_entry(entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("failed to read nested mod {} in {}: {}", entry, owner_path, e);
                continue;
            }
        };
        match ModFile::from_bytes(bytes, entry.as_str(), Some(owner_path.to_string())) {
            Ok(child) => result.push(child),
            Err(e) => warn!("skipping nested mod {} in {}: {}", entry, owner_path, e),
        }
    }
    result
}
