use crate::core::installation::GameInstallation;
use crate::core::mod_file::ModFile;
use crate::models::check::{CheckFinding, Remedy};
use camino::Utf8PathBuf;
use std::collections::BTreeMap;

/// Validates every enabled mod of an installation and returns the findings,
/// keyed by the mod file's path. A mod with no findings is absent from the
/// map entirely.
pub fn check_installation(
    installation: &mut GameInstallation,
) -> BTreeMap<Utf8PathBuf, Vec<CheckFinding>> {
    installation.mods_or_load();

    let mut result = BTreeMap::new();
    for mod_file in installation.mods() {
        if !mod_file.enabled() {
            continue;
        }
        let mut findings = check_mod_depends(installation, mod_file);
        if let Some(loader_finding) = check_mod_loader(installation, mod_file) {
            findings.push(loader_finding);
        }
        if !findings.is_empty() {
            result.insert(mod_file.path().to_owned(), findings);
        }
    }
    result
}

/// Advisory when a mod targets none of the loaders this installation runs.
/// Multi-loader detection is heuristic, so this is phrased as a question
/// rather than a verdict.
pub fn check_mod_loader(
    installation: &GameInstallation,
    mod_file: &ModFile,
) -> Option<CheckFinding> {
    let loaders = mod_file.supported_loaders();
    if loaders.contains(&installation.kind) {
        return None;
    }
    let targets = loaders
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/");
    Some(CheckFinding::new(
        format!(
            "Installed a {} mod into a {} installation?",
            targets, installation.kind
        ),
        None,
    ))
}

/// Presence/enablement findings for every mandatory dependency of the
/// descriptor matching the installation's loader. A mod with no descriptor
/// for that loader is skipped entirely (the loader advisory still applies).
pub fn check_mod_depends(
    installation: &GameInstallation,
    mod_file: &ModFile,
) -> Vec<CheckFinding> {
    let Some(descriptor) = mod_file.descriptor_for(installation.kind) else {
        return Vec::new();
    };

    let mut findings = Vec::new();
    for dep in &descriptor.dependencies {
        if !dep.mandatory {
            continue;
        }
        match installation.mod_by_id(&dep.mod_id) {
            None => findings.push(CheckFinding::new(
                format!("Missing prerequisite mod: {}", dep.mod_id),
                Some(Remedy::Install(dep.mod_id.clone())),
            )),
            Some(provider) if !provider.enabled() => findings.push(CheckFinding::new(
                format!("Prerequisite mod {} is present but disabled", dep.mod_id),
                Some(Remedy::Enable(dep.mod_id.clone())),
            )),
            Some(_) => {}
        }
    }
    findings
}
