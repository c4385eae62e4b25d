use semver::{Version, VersionReq};

use sprout_error::{Result, SproutError};

fn parsed(versions: &[String]) -> impl Iterator<Item = (Version, &String)> {
    versions
        .iter()
        .filter_map(|v_str| Version::parse(v_str).ok().map(|v| (v, v_str)))
}

/// Highest version by semver precedence. Strings that are not valid semver
/// are ignored; `Version`'s ordering is total, so the pick is stable.
pub fn select_latest(versions: &[String]) -> Result<String> {
    parsed(versions)
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, v_str)| v_str.clone())
        .ok_or_else(|| {
            SproutError::NoVersions(if versions.is_empty() {
                "an empty version set".to_string()
            } else {
                format!("{} unparseable version(s)", versions.len())
            })
        })
}

/// Highest version satisfying `^base_version`.
///
/// `None` means nothing newer is compatible, which callers treat as
/// "nothing to do" rather than a failure. Pre-releases only match when the
/// base is itself a pre-release of the same `major.minor.patch`.
#[must_use]
pub fn select_compatible(base_version: &str, versions: &[String]) -> Option<String> {
    let req = VersionReq::parse(&format!("^{}", base_version.trim())).ok()?;

    parsed(versions)
        .filter(|(v, _)| req.matches(v))
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, v_str)| v_str.clone())
}

/// Sort ascending by semver precedence; unparseable strings go last.
pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by_cached_key(|v| {
        let parsed = Version::parse(v).ok();
        (parsed.is_none(), parsed, v.clone())
    });
}

/// `true` when `candidate` has higher precedence than `current`.
#[must_use]
pub fn is_newer(candidate: &str, current: &str) -> bool {
    match (Version::parse(candidate), Version::parse(current)) {
        (Ok(candidate), Ok(current)) => candidate > current,
        _ => false,
    }
}
