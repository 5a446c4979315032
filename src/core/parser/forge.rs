use crate::core::archive::ModArchive;
use crate::core::descriptor::{ModDescriptor, DEFAULT_MC_VERSION, DEFAULT_VERSION};
use crate::core::parser::{self, FORGE_DESCRIPTOR, JAR_MANIFEST};
use crate::models::depend::ModDependency;
use crate::models::error::MvError;
use crate::models::loader::LoaderKind;
use std::collections::BTreeMap;
use toml::Value;

pub fn parse(archive: &mut ModArchive, owner_path: &str) -> Result<ModDescriptor, MvError> {
    let raw = archive.read_entry(FORGE_DESCRIPTOR)?;
    let text = String::from_utf8(raw)
        .map_err(|e| MvError::MalformedDocument(format!("{}: {}", FORGE_DESCRIPTOR, e)))?;
    // Indented descriptors are common; the TOML crate rejects some of them,
    // so every line is whitespace-normalized before decoding.
    let normalized: String = text
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    let root: Value = toml::from_str(&normalized)?;

    // Identity lives in the first (and in practice only) [[mods]] table.
    let mods = root
        .get("mods")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(Value::as_table)
        .filter(|table| !table.is_empty())
        .ok_or_else(|| MvError::MissingSection("mods".to_string()))?;

    let mut name = table_str(mods, "displayName");
    let mut mod_id = table_str(mods, "modId");
    let mut version = mods
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_VERSION)
        .to_string();
    let description = table_str(mods, "description");

    let mut authors = Vec::new();
    match mods.get("authors") {
        Some(Value::String(s)) => {
            authors.extend(s.split(',').map(|a| a.trim().to_string()));
        }
        Some(Value::Array(list)) => {
            for author in list {
                if let Some(s) = author.as_str() {
                    authors.push(s.to_string());
                }
            }
        }
        _ => {}
    }

    let mut links = BTreeMap::new();
    let homepage = table_str(mods, "displayURL");
    if !homepage.is_empty() {
        links.insert("homepage".to_string(), homepage);
    }

    // Dependencies live in a separate top-level map keyed by the mod's own
    // id, so the id must be resolved before they can be located. The manifest
    // backfill below may still change presentation fields afterwards, but the
    // lookup always uses the id the primary document declared.
    let mut dependencies = Vec::new();
    let mut mc_version = DEFAULT_MC_VERSION.to_string();
    let declared = root
        .get("dependencies")
        .and_then(|deps| deps.get(mod_id.as_str()))
        .and_then(Value::as_array);
    if let Some(declared) = declared {
        for dep in declared {
            let Some(record) = dep.as_table() else {
                continue;
            };
            let target = table_str(record, "modId");
            let range = table_str(record, "versionRange");
            if target == "minecraft" {
                mc_version = range;
                continue;
            }
            if target == "forge" || target == "java" {
                continue;
            }
            dependencies.push(ModDependency {
                mod_id: target,
                mandatory: is_mandatory(record.get("mandatory")),
                version_range: range,
                ordering: table_str(record, "ordering"),
                side: table_str(record, "side"),
            });
        }
    }

    // Enrichment pass: jar manifests often carry the identity the descriptor
    // left templated or blank. Conditional per field, never a full overwrite;
    // a jar without a manifest simply keeps the defaults.
    if version_is_placeholder(&version) || name.is_empty() || mod_id.is_empty() {
        if let Ok(manifest) = archive.read_entry(JAR_MANIFEST) {
            let fields = parse_manifest(&manifest);
            if version_is_placeholder(&version) {
                version = fields
                    .get("Implementation-Version")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_VERSION.to_string());
            }
            if name.is_empty() {
                name = fields
                    .get("Implementation-Title")
                    .cloned()
                    .unwrap_or_default();
            }
            if mod_id.is_empty() {
                mod_id = fields
                    .get("Specification-Title")
                    .cloned()
                    .unwrap_or_default();
            }
        }
    }
    if version_is_placeholder(&version) {
        version = DEFAULT_VERSION.to_string();
    }

    let icon_path = mods
        .get("logoFile")
        .and_then(Value::as_str)
        .map(str::to_string);
    let icon = parser::read_icon(archive, icon_path.as_deref(), owner_path);

    Ok(ModDescriptor {
        loader: LoaderKind::Forge,
        name,
        mod_id,
        version,
        mc_version,
        description,
        links,
        authors,
        icon,
        dependencies,
        provides: Vec::new(),
        child_mods: Vec::new(),
    })
}

fn version_is_placeholder(version: &str) -> bool {
    version.to_lowercase().contains("version") || version == DEFAULT_VERSION
}

/// `mandatory` is a TOML boolean in well-formed descriptors, but quoted
/// booleans show up in the wild.
fn is_mandatory(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Boolean(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Line-oriented `Key: Value` manifest decoding. Lines without a colon are
/// ignored.
fn parse_manifest(raw: &[u8]) -> BTreeMap<String, String> {
    let text = String::from_utf8_lossy(raw);
    let mut result = BTreeMap::new();
    for line in text.lines() {
        if let Some(split) = line.find(':') {
            let key = line[..split].trim().to_string();
            let value = line[split + 1..].trim().to_string();
            result.insert(key, value);
        }
    }
    result
}

fn table_str(table: &toml::value::Table, key: &str) -> String {
    table
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
