use crate::core::archive::ModArchive;
use crate::core::descriptor::{ModDescriptor, DEFAULT_MC_VERSION, DEFAULT_VERSION};
use crate::core::parser::{self, QUILT_DESCRIPTOR};
use crate::models::depend::ModDependency;
use crate::models::error::MvError;
use crate::models::loader::LoaderKind;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const NON_MOD_DEPENDS: [&str; 4] = ["minecraft", "java", "quilt", "quilt_loader"];

/// Quilt nests identity two levels deep: the `quilt_loader` section carries
/// id/version/depends/jars, and its `metadata` sub-section carries the
/// presentation fields. Both sections are mandatory; a document without them
/// is a hard parse failure, not a degraded partial parse.
pub fn parse(archive: &mut ModArchive, owner_path: &str) -> Result<ModDescriptor, MvError> {
    let raw = archive.read_entry(QUILT_DESCRIPTOR)?;
    let root = parser::decode_lenient_json(&raw)?;

    let loader_info = match root.get("quilt_loader") {
        Some(Value::Object(section)) if !section.is_empty() => section,
        _ => return Err(MvError::MissingSection("quilt_loader".to_string())),
    };
    let metadata = match loader_info.get("metadata") {
        Some(Value::Object(section)) if !section.is_empty() => section,
        _ => return Err(MvError::MissingSection("quilt_loader.metadata".to_string())),
    };

    let mod_id = str_field(loader_info, "id");
    let mut version = loader_info
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_VERSION)
        .to_string();
    if version.contains("version") {
        version = DEFAULT_VERSION.to_string();
    }

    let name = str_field(metadata, "name");
    let description = str_field(metadata, "description");

    let mut links = BTreeMap::new();
    if let Some(Value::Object(contact)) = metadata.get("contact") {
        for (kind, url) in contact {
            if let Value::String(url) = url {
                links.insert(kind.clone(), url.clone());
            }
        }
    }

    // Contributors are usually a map of name to role; some mods ship a list
    // of comma-joined names or of name/role records instead.
    let mut authors = Vec::new();
    match metadata.get("contributors") {
        Some(Value::Object(contributors)) => {
            authors.extend(contributors.keys().cloned());
        }
        Some(Value::Array(contributors)) => {
            for entry in contributors {
                match entry {
                    Value::String(s) if !s.is_empty() => {
                        authors.extend(s.split(',').map(|a| a.trim().to_string()));
                    }
                    Value::Object(record) => {
                        for (k, v) in record {
                            if let Value::String(v) = v {
                                authors.push(format!("{}:{}", k, v));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }

    let raw_depends = loader_info
        .get("depends")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    // The game-version entry has no fixed key; it is found by scanning the
    // dependency list for the game's own id.
    let mut mc_version = DEFAULT_MC_VERSION.to_string();
    for dep in &raw_depends {
        if let Value::Object(record) = dep {
            let id = record.get("id").and_then(Value::as_str).unwrap_or_default();
            if id.eq_ignore_ascii_case("minecraft") {
                mc_version = record
                    .get("versions")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_MC_VERSION)
                    .to_string();
                break;
            }
        }
    }

    let mut dependencies = Vec::new();
    for dep in &raw_depends {
        match dep {
            // A bare identifier means mandatory, any version.
            Value::String(id) if !id.is_empty() => {
                if NON_MOD_DEPENDS.contains(&id.as_str()) {
                    continue;
                }
                dependencies.push(ModDependency::mandatory(id.clone(), "*"));
            }
            Value::Object(record) => {
                let id = record.get("id").and_then(Value::as_str).unwrap_or_default();
                if id.is_empty() || NON_MOD_DEPENDS.contains(&id) {
                    continue;
                }
                let range = record
                    .get("versions")
                    .and_then(Value::as_str)
                    .unwrap_or("*");
                dependencies.push(ModDependency::mandatory(id, range));
            }
            _ => {}
        }
    }

    let mut provides = Vec::new();
    if let Some(Value::Array(list)) = loader_info.get("provides") {
        for entry in list {
            match entry {
                Value::String(id) if !id.is_empty() => provides.push(id.clone()),
                Value::Object(record) => {
                    if let Some(id) = record.get("id").and_then(Value::as_str) {
                        provides.push(id.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    let jar_entries: Vec<String> = loader_info
        .get("jars")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let child_mods = parser::parse_child_mods(archive, &jar_entries, owner_path);

    let icon_path = metadata
        .get("icon")
        .and_then(Value::as_str)
        .map(str::to_string);
    let icon = parser::read_icon(archive, icon_path.as_deref(), owner_path);

    Ok(ModDescriptor {
        loader: LoaderKind::Quilt,
        name,
        mod_id,
        version,
        mc_version,
        description,
        links,
        authors,
        icon,
        dependencies,
        provides,
        child_mods,
    })
}

fn str_field(section: &Map<String, Value>, key: &str) -> String {
    section
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
