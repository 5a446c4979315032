mod common;

use common::{setup_test_env, simple_fabric_json, write_installation, write_jar};
use mod_vault::config::AppConfig;
use mod_vault::core::installation::{GameInstallation, UNKNOWN_MC_VERSION};
use mod_vault::core::manager::ModManager;
use mod_vault::core::mod_file::ModFile;
use mod_vault::core::scan;
use mod_vault::models::loader::LoaderKind;

#[test]
fn scan_keeps_usable_archives_and_skips_the_rest() {
    let (_tmp, root) = setup_test_env();
    let mods_dir = root.join("mods");
    std::fs::create_dir_all(&mods_dir).unwrap();

    write_jar(
        &mods_dir.join("alpha.jar"),
        &[("fabric.mod.json", simple_fabric_json("alpha").as_bytes())],
    );
    write_jar(
        &mods_dir.join("beta.jar.disabled"),
        &[("fabric.mod.json", simple_fabric_json("beta").as_bytes())],
    );
    // Wrong extension: not a candidate at all.
    std::fs::write(mods_dir.join("notes.txt"), "hello").unwrap();
    // Right extension, not a zip: constructed, fails, skipped.
    std::fs::write(mods_dir.join("corrupt.jar"), "not a zip archive").unwrap();
    // Valid zip, no recognized descriptor: unusable, skipped.
    write_jar(
        &mods_dir.join("plain.jar"),
        &[("readme.txt", b"nothing".as_slice())],
    );

    let mut seen: Vec<String> = Vec::new();
    let mut done_lists: Vec<usize> = Vec::new();
    let result = scan::load_mods(
        &mods_dir,
        Some(&mut |m: &ModFile| seen.push(m.ids().join(","))),
        Some(&mut |all: &[ModFile]| done_lists.push(all.len())),
    );

    assert_eq!(result.len(), 2);
    // Listing order is name-sorted, so callbacks fire deterministically.
    assert_eq!(seen, vec!["alpha", "beta"]);
    assert_eq!(done_lists, vec![2]);
    assert!(result[0].enabled());
    assert!(!result[1].enabled());
}

#[test]
fn scanning_a_missing_directory_yields_empty_and_still_completes() {
    let (_tmp, root) = setup_test_env();
    let mut done_calls = 0;
    let result = scan::load_mods(
        &root.join("does-not-exist"),
        None,
        Some(&mut |all: &[ModFile]| {
            done_calls += 1;
            assert!(all.is_empty());
        }),
    );
    assert!(result.is_empty());
    assert_eq!(done_calls, 1);
}

#[test]
fn installation_classification_from_companion_descriptor() {
    let (_tmp, root) = setup_test_env();

    let fabric_dir = write_installation(&root, "1.19.2-fabric", "net.fabricmc.loader.launch", "1.19.2");
    let game = GameInstallation::create(&fabric_dir).unwrap();
    assert_eq!(game.kind, LoaderKind::Fabric);
    assert_eq!(game.mc_version, "1.19.2");
    assert_eq!(game.dir_name, "1.19.2-fabric");

    let forge_dir = write_installation(&root, "1.18.2-forge", "cpw.mods.bootstraplauncher.Main", "1.18.2");
    assert_eq!(GameInstallation::create(&forge_dir).unwrap().kind, LoaderKind::Forge);

    let quilt_dir = write_installation(&root, "quilt", "org.quiltmc.loader.Launch", "1.19.2");
    assert_eq!(GameInstallation::create(&quilt_dir).unwrap().kind, LoaderKind::Quilt);

    let vanilla_dir = write_installation(&root, "vanilla", "net.minecraft.client.main.Main", "1.20");
    assert_eq!(GameInstallation::create(&vanilla_dir).unwrap().kind, LoaderKind::Vanilla);

    // Unrecognized main class: Other, and the version is not even read.
    let odd_dir = write_installation(&root, "odd", "com.example.Launcher", "1.20");
    let odd = GameInstallation::create(&odd_dir).unwrap();
    assert_eq!(odd.kind, LoaderKind::Other);
    assert_eq!(odd.mc_version, UNKNOWN_MC_VERSION);

    // No companion file at all: Other with unknown version.
    let bare_dir = root.join("bare");
    std::fs::create_dir_all(&bare_dir).unwrap();
    let bare = GameInstallation::create(&bare_dir).unwrap();
    assert_eq!(bare.kind, LoaderKind::Other);
    assert_eq!(bare.mc_version, UNKNOWN_MC_VERSION);
}

#[test]
fn installation_version_from_patches_fallback() {
    let (_tmp, root) = setup_test_env();
    let version_dir = root.join("patched");
    std::fs::create_dir_all(&version_dir).unwrap();
    let companion = r#"{
        "mainClass": "net.fabricmc.loader.launch",
        "patches": [
            {"id": "fabric-loader", "version": "0.14.21"},
            {"id": "game", "version": "1.19.4"}
        ]
    }"#;
    std::fs::write(version_dir.join("patched.json"), companion).unwrap();

    let game = GameInstallation::create(&version_dir).unwrap();
    assert_eq!(game.mc_version, "1.19.4");
}

#[test]
fn game_scan_skips_unreadable_companions() {
    let (_tmp, root) = setup_test_env();
    let versions = root.join("versions");
    write_installation(&versions, "good", "net.fabricmc.loader.launch", "1.19.2");

    let broken = versions.join("broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("broken.json"), "{not json").unwrap();

    // Stray files in the versions dir are not installations.
    std::fs::write(versions.join("stray.txt"), "x").unwrap();

    let games = scan::load_games(&versions, None, None);
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].dir_name, "good");
}

#[test]
fn installation_lazy_loads_and_reloads_mods() {
    let (_tmp, root) = setup_test_env();
    let version_dir = write_installation(&root, "inst", "net.fabricmc.loader.launch", "1.19.2");
    write_jar(
        &version_dir.join("mods/alpha.jar"),
        &[("fabric.mod.json", simple_fabric_json("alpha").as_bytes())],
    );

    let mut game = GameInstallation::create(&version_dir).unwrap();
    assert_eq!(game.mods_or_load().len(), 1);

    // A file dropped in after the first load is invisible until a reload.
    write_jar(
        &version_dir.join("mods/later.jar"),
        &[("fabric.mod.json", simple_fabric_json("later").as_bytes())],
    );
    assert_eq!(game.mods_or_load().len(), 1);
    game.reload_mods(None, None);
    assert_eq!(game.mods().len(), 2);

    assert!(game.has_mod_by_id("alpha"));
    assert!(game.has_mod_by_id("later"));
    assert!(!game.has_mod_by_id("missing"));
    assert!(game.has_mod_by_file("ALPHA.JAR"));
    assert!(!game.has_mod_by_file("gamma.jar"));
}

#[test]
fn installation_add_and_remove_mod() {
    let (_tmp, root) = setup_test_env();
    let version_dir = write_installation(&root, "inst", "net.fabricmc.loader.launch", "1.19.2");

    let source = root.join("downloads/newmod.jar");
    write_jar(
        &source,
        &[("fabric.mod.json", simple_fabric_json("newmod").as_bytes())],
    );
    let source_mod = ModFile::create(&source).unwrap();

    let mut game = GameInstallation::create(&version_dir).unwrap();
    game.add_mod(&source_mod).unwrap();
    assert!(version_dir.join("mods/newmod.jar").exists());
    assert!(game.has_mod_by_id("newmod"));

    let stored = game.mod_by_id("newmod").unwrap().clone();
    game.remove_mod(&stored).unwrap();
    assert!(!version_dir.join("mods/newmod.jar").exists());
    assert!(!game.has_mod_by_id("newmod"));

    // Removing a mod that is no longer present is a silent no-op.
    game.remove_mod(&stored).unwrap();
}

#[test]
fn manager_loads_and_adds_into_the_local_repository() {
    let (_tmp, root) = setup_test_env();
    let config = AppConfig {
        version: 0,
        game_version_dir: root.join("versions"),
        local_mods_dir: root.join("local_mods"),
        ui_scale: 1.0,
    };
    write_installation(&config.game_version_dir, "inst", "cpw.mods.Main", "1.18.2");

    let source = root.join("downloads/libmod.jar.disabled");
    write_jar(
        &source,
        &[("fabric.mod.json", simple_fabric_json("libmod").as_bytes())],
    );
    let source_mod = ModFile::create(&source).unwrap();

    let mut manager = ModManager::new(config);
    assert!(manager.local_mods_or_load().is_empty());
    assert_eq!(manager.games_or_load().len(), 1);

    // Adding copies the archive in and enables the copy.
    let added = manager.add_mod(&source_mod).unwrap();
    assert!(added.enabled());
    assert_eq!(added.ids(), vec!["libmod"]);
    let added_path = added.path().to_owned();
    assert!(added_path.as_str().ends_with("libmod.jar"));

    // Adding an entry already in the repository returns it untouched.
    let listed = manager.local_mods_or_load().to_vec();
    assert_eq!(listed.len(), 1);
    let again = manager.add_mod(&listed[0]).unwrap();
    assert_eq!(again.path(), added_path);
    assert_eq!(manager.local_mods_or_load().len(), 1);
}

#[test]
fn config_defaults_and_scaling() {
    let config = AppConfig::default();
    assert_eq!(config.ui_scale, 1.0);
    assert!(config.game_version_dir.as_str().contains(".minecraft"));
    assert_eq!(config.scaled(16), 16);

    let scaled_up = AppConfig {
        ui_scale: 1.5,
        ..AppConfig::default()
    };
    assert_eq!(scaled_up.scaled(16), 24);
}
