use camino::{Utf8Path, Utf8PathBuf};
use std::io::{Cursor, Write};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Temp directory as a Utf8 root for a test scenario.
pub fn setup_test_env() -> (TempDir, Utf8PathBuf) {
    mod_vault::utils::log::init();
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
    (tmp, root)
}

/// Builds a jar (zip) in memory from `(entry name, content)` pairs.
pub fn jar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Writes a jar built from `entries` to `path`.
pub fn write_jar(path: &Utf8Path, entries: &[(&str, &[u8])]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, jar_bytes(entries)).unwrap();
}

/// Minimal valid fabric descriptor.
pub fn simple_fabric_json(id: &str) -> String {
    format!(
        r#"{{"schemaVersion": 1, "id": "{id}", "version": "1.0.0", "name": "{id} name", "description": "{id} description"}}"#
    )
}

/// Fabric descriptor with one mandatory dependency.
pub fn fabric_json_with_dep(id: &str, dep_id: &str) -> String {
    format!(
        r#"{{"schemaVersion": 1, "id": "{id}", "version": "1.0.0", "name": "{id} name", "description": "{id} description", "depends": {{"{dep_id}": ">=1.0.0"}}}}"#
    )
}

/// Creates a version directory with a companion descriptor and an empty
/// `mods` subdirectory; returns the version directory path.
pub fn write_installation(
    root: &Utf8Path,
    dir_name: &str,
    main_class: &str,
    client_version: &str,
) -> Utf8PathBuf {
    let version_dir = root.join(dir_name);
    std::fs::create_dir_all(version_dir.join("mods")).unwrap();
    let companion = format!(
        r#"{{"mainClass": "{main_class}", "clientVersion": "{client_version}"}}"#
    );
    std::fs::write(version_dir.join(format!("{dir_name}.json")), companion).unwrap();
    version_dir
}
