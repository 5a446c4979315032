use camino::{Utf8Path, Utf8PathBuf};

/// Strips any run of the given extensions off the end of a path string, so
/// `mods/sodium.jar.disabled` with `["jar", "disable", "disabled"]` becomes
/// `mods/sodium`.
pub fn clear_path_suffix(path: &str, suffixes: &[&str]) -> String {
    let mut current = path;
    'outer: loop {
        for suffix in suffixes {
            let stripped = current
                .strip_suffix(suffix)
                .and_then(|rest| rest.strip_suffix('.'));
            if let Some(rest) = stripped {
                current = rest;
                continue 'outer;
            }
        }
        return current.to_string();
    }
}

/// A free target path for `file_name` inside `dir`: the name itself when it
/// is unused, otherwise the first `1_name`, `2_name`, ... that is.
pub fn unique_target_path(dir: &Utf8Path, file_name: &str) -> Utf8PathBuf {
    let direct = dir.join(file_name);
    if !direct.exists() {
        return direct;
    }
    let mut counter: u32 = 1;
    loop {
        let candidate = dir.join(format!("{}_{}", counter, file_name));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
