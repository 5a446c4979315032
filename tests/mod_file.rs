mod common;

use common::{jar_bytes, setup_test_env, simple_fabric_json, write_jar};
use mod_vault::core::mod_file::ModFile;
use mod_vault::models::error::MvError;
use mod_vault::models::loader::LoaderKind;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfakeimage";

/// Outer jar -> middle jar -> innermost jar, each declared via fabric `jars`.
fn triple_nested_bytes() -> Vec<u8> {
    let innermost = jar_bytes(&[(
        "fabric.mod.json",
        simple_fabric_json("core-lib").as_bytes(),
    )]);

    let middle_descriptor = r#"{
        "id": "middle",
        "version": "1.0.0",
        "name": "Middle",
        "jars": [{"file": "libs/core-lib.jar"}]
    }"#;
    let middle = jar_bytes(&[
        ("fabric.mod.json", middle_descriptor.as_bytes()),
        ("libs/core-lib.jar", innermost.as_slice()),
    ]);

    let outer_descriptor = r#"{
        "id": "outer",
        "version": "1.0.0",
        "name": "Outer",
        "jars": [{"file": "META-INF/jars/middle.jar"}]
    }"#;
    jar_bytes(&[
        ("fabric.mod.json", outer_descriptor.as_bytes()),
        ("META-INF/jars/middle.jar", middle.as_slice()),
    ])
}

#[test]
fn includes_id_reaches_triple_nested_mods() {
    let outer = ModFile::from_bytes(triple_nested_bytes(), "outer.jar", None).unwrap();

    assert!(outer.includes_id("outer", None));
    assert!(outer.includes_id("middle", None));
    // Only present three levels deep.
    assert!(outer.includes_id("core-lib", None));
    assert!(outer.includes_id("core-lib", Some(LoaderKind::Fabric)));
    assert!(!outer.includes_id("core-lib", Some(LoaderKind::Forge)));
    assert!(!outer.includes_id("nothere", None));

    let found = outer.find_included("core-lib", None).unwrap();
    assert_eq!(found.ids(), vec!["core-lib"]);
    assert!(found.is_nested());
    // Nested full paths chain through their ancestors.
    assert_eq!(
        found.full_path(),
        "outer.jar:META-INF/jars/middle.jar:libs/core-lib.jar"
    );
}

#[test]
fn provided_ids_satisfy_lookups() {
    let descriptor = r#"{
        "id": "indium",
        "version": "1.0.0",
        "name": "Indium",
        "provides": ["sodium-compat"]
    }"#;
    let bytes = jar_bytes(&[("fabric.mod.json", descriptor.as_bytes())]);
    let mod_file = ModFile::from_bytes(bytes, "indium.jar", None).unwrap();

    assert!(mod_file.includes_id("indium", None));
    assert!(mod_file.includes_id("sodium-compat", None));
}

#[test]
fn search_is_case_insensitive_and_loader_filtered() {
    let descriptor = r#"{
        "id": "sodium",
        "version": "1.0.0",
        "name": "Sodium",
        "description": "Modern rendering engine"
    }"#;
    let bytes = jar_bytes(&[("fabric.mod.json", descriptor.as_bytes())]);
    let mod_file = ModFile::from_bytes(bytes, "sodium.jar", None).unwrap();

    assert!(mod_file.matches_search("SODI", None));
    assert!(mod_file.matches_search("rendering", None));
    assert!(!mod_file.matches_search("shaders", None));
    assert!(mod_file.matches_search("sodium", Some(LoaderKind::Fabric)));
    // Filtering to a loader the mod doesn't have leaves nothing to match.
    assert!(!mod_file.matches_search("sodium", Some(LoaderKind::Forge)));
}

#[test]
fn names_and_ids_deduplicate_across_descriptors() {
    let fabric = r#"{"id": "dual", "version": "1.0.0", "name": "Dual Mod"}"#;
    let forge = br#"
        [[mods]]
        modId="dual-forge"
        version="1.0.0"
        displayName="Dual Mod"
    "#;
    let bytes = jar_bytes(&[
        ("fabric.mod.json", fabric.as_bytes()),
        ("META-INF/mods.toml", forge.as_slice()),
    ]);
    let mod_file = ModFile::from_bytes(bytes, "dual.jar", None).unwrap();

    assert_eq!(mod_file.names(), vec!["Dual Mod"]);
    assert_eq!(mod_file.ids(), vec!["dual", "dual-forge"]);
}

#[test]
fn toggling_enabled_renames_the_file() {
    let (_tmp, root) = setup_test_env();
    let jar = root.join("testmod.jar");
    write_jar(
        &jar,
        &[("fabric.mod.json", simple_fabric_json("testmod").as_bytes())],
    );

    let mut mod_file = ModFile::create(&jar).unwrap();
    assert!(mod_file.enabled());

    mod_file.set_enabled(false).unwrap();
    assert!(!mod_file.enabled());
    assert!(mod_file.path().as_str().ends_with("testmod.jar.disabled"));
    assert!(!jar.exists());
    assert!(root.join("testmod.jar.disabled").exists());

    mod_file.set_enabled(true).unwrap();
    assert!(mod_file.enabled());
    assert!(root.join("testmod.jar").exists());
}

#[test]
fn setting_the_current_state_performs_no_filesystem_call() {
    let (_tmp, root) = setup_test_env();
    let jar = root.join("idempotent.jar");
    write_jar(
        &jar,
        &[("fabric.mod.json", simple_fabric_json("idempotent").as_bytes())],
    );

    let mut mod_file = ModFile::create(&jar).unwrap();
    let path_before = mod_file.path().to_owned();

    // Pull the file out from under the model: a same-state set must still
    // succeed because it never touches the filesystem.
    std::fs::remove_file(mod_file.path()).unwrap();
    mod_file.set_enabled(true).unwrap();
    assert_eq!(mod_file.path(), path_before);

    // A real toggle now has to rename a missing file and must surface that.
    assert!(mod_file.set_enabled(false).is_err());
}

#[test]
fn copy_reparses_and_numbers_collisions() {
    let (_tmp, root) = setup_test_env();
    let jar = root.join("copyme.jar");
    write_jar(
        &jar,
        &[
            ("fabric.mod.json", simple_fabric_json("copyme").as_bytes()),
            ("assets/icon.png", PNG),
        ],
    );
    let mod_file = ModFile::create(&jar).unwrap();

    let dest = root.join("repo");
    std::fs::create_dir_all(&dest).unwrap();

    let copy = mod_file.copy_to(&dest).unwrap();
    assert_eq!(copy.ids(), mod_file.ids());
    assert_eq!(copy.names(), mod_file.names());
    assert!(copy.enabled());
    assert!(dest.join("copyme.jar").exists());

    // Copying again collides; an incrementing prefix resolves it.
    let second = mod_file.copy_to(&dest).unwrap();
    assert_eq!(second.path().file_name(), Some("1_copyme.jar"));
    let third = mod_file.copy_to(&dest).unwrap();
    assert_eq!(third.path().file_name(), Some("2_copyme.jar"));
}

#[test]
fn nested_mods_cannot_be_copied() {
    let (_tmp, root) = setup_test_env();
    let outer = ModFile::from_bytes(triple_nested_bytes(), "outer.jar", None).unwrap();
    let child = &outer.descriptors[0].child_mods[0];

    let err = child.copy_to(&root).unwrap_err();
    assert!(matches!(err, MvError::NestedMod(_)));
}

#[test]
fn icon_is_exposed_as_data_uri() {
    let descriptor = r#"{"id": "shiny", "version": "1.0.0", "icon": "icon.png"}"#;
    let bytes = jar_bytes(&[
        ("fabric.mod.json", descriptor.as_bytes()),
        ("icon.png", PNG),
    ]);
    let mod_file = ModFile::from_bytes(bytes, "shiny.jar", None).unwrap();

    assert_eq!(mod_file.icon(), Some(PNG));
    let uri = mod_file.icon_data_uri().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
}
