use std::cmp::Ordering;

/// Compares two dotted game-version strings segment by segment.
///
/// Segments are numeric except for the `x` wildcard: `x` against `x` is
/// equal, `x` against a number sorts below it. A shorter version sorts below
/// a longer one with the same prefix.
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_matches(|c| c == '.' || c == ' ');
    let b = b.trim_matches(|c| c == '.' || c == ' ');
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();

    let mut i = 0;
    loop {
        match (a_parts.get(i), b_parts.get(i)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&pa), Some(&pb)) => {
                if pa == "x" && pb == "x" {
                    return Ordering::Equal;
                }
                if pa == "x" {
                    return Ordering::Less;
                }
                if pb == "x" {
                    return Ordering::Greater;
                }
                let na = pa.parse::<u64>().unwrap_or(0);
                let nb = pb.parse::<u64>().unwrap_or(0);
                match na.cmp(&nb) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
        }
        i += 1;
    }
}

/// Whether a game version falls inside a Forge maven-style version range,
/// e.g. `[1.18.2]`, `[1.18,1.19)` or `[1.19,)`.
///
/// Bare major versions like `18.2` are normalized to `1.18.2` first; a range
/// that is not bracketed at all is never a match.
pub fn in_forge_range(version: &str, range: &str) -> bool {
    if range.len() < 2 || !(range.starts_with('[') || range.starts_with('(')) {
        return false;
    }

    let mut version = version.to_string();
    let major = version
        .split('.')
        .next()
        .and_then(|part| part.parse::<u64>().ok());
    if major.is_some_and(|m| m > 1) {
        version = format!("1.{}", version);
    }

    let start_inclusive = range.starts_with('[');
    let end_inclusive = range.ends_with(']');
    let inner = &range[1..range.len() - 1];
    let bounds: Vec<&str> = inner.split(',').collect();

    if bounds.len() == 1 {
        return version_cmp(bounds[0], &version) == Ordering::Equal;
    }

    let low = if bounds[0].is_empty() { "0" } else { bounds[0] };
    let high = if bounds[1].is_empty() {
        "99999999"
    } else {
        bounds[1]
    };

    let against_low = version_cmp(&version, low);
    let against_high = version_cmp(&version, high);
    if against_low == Ordering::Equal && start_inclusive {
        return true;
    }
    if against_high == Ordering::Equal && end_inclusive {
        return true;
    }
    against_low == Ordering::Greater && against_high == Ordering::Less
}
