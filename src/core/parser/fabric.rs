use crate::core::archive::ModArchive;
use crate::core::descriptor::{ModDescriptor, DEFAULT_MC_VERSION, DEFAULT_VERSION};
use crate::core::parser::{self, FABRIC_DESCRIPTOR};
use crate::models::depend::ModDependency;
use crate::models::error::MvError;
use crate::models::loader::LoaderKind;
use serde_json::Value;
use std::collections::BTreeMap;

/// Dependency targets that name the game itself, the loader or the platform
/// runtime rather than another mod.
const NON_MOD_DEPENDS: [&str; 4] = ["minecraft", "fabricloader", "java", "fabric"];

pub fn parse(archive: &mut ModArchive, owner_path: &str) -> Result<ModDescriptor, MvError> {
    let raw = archive.read_entry(FABRIC_DESCRIPTOR)?;
    let root = parser::decode_lenient_json(&raw)?;

    let name = str_value(root.get("name"));
    let mod_id = str_value(root.get("id"));
    let description = str_value(root.get("description"));

    let mut version = root
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_VERSION)
        .to_string();
    // An unexpanded "${version}"-style token is worse than no version at all.
    if version.contains("version") {
        version = DEFAULT_VERSION.to_string();
    }

    // Authors are either plain strings or records carrying a name field.
    let mut authors = Vec::new();
    if let Some(Value::Array(list)) = root.get("authors") {
        for author in list {
            match author {
                Value::String(s) if !s.is_empty() => authors.push(s.clone()),
                Value::Object(record) => {
                    if let Some(name) = record.get("name").and_then(Value::as_str) {
                        if !name.is_empty() {
                            authors.push(name.to_string());
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let mut links = BTreeMap::new();
    if let Some(Value::Object(contact)) = root.get("contact") {
        for (kind, url) in contact {
            if let Value::String(url) = url {
                links.insert(kind.clone(), url.clone());
            }
        }
    }

    let mut dependencies = Vec::new();
    let mut mc_version = DEFAULT_MC_VERSION.to_string();
    if let Some(Value::Object(depends)) = root.get("depends") {
        for (target, range) in depends {
            let range = range.as_str().unwrap_or_default().to_string();
            if target == "minecraft" {
                mc_version = range.clone();
            }
            if NON_MOD_DEPENDS.contains(&target.as_str()) {
                continue;
            }
            dependencies.push(ModDependency::mandatory(target.clone(), range));
        }
    }

    let provides = root
        .get("provides")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let jar_entries: Vec<String> = root
        .get("jars")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|jar| jar.get("file").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let child_mods = parser::parse_child_mods(archive, &jar_entries, owner_path);

    let icon_path = root.get("icon").and_then(Value::as_str).map(str::to_string);
    let icon = parser::read_icon(archive, icon_path.as_deref(), owner_path);

    Ok(ModDescriptor {
        loader: LoaderKind::Fabric,
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

fn str_value(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}
