use std::path::{Component, Path, PathBuf};

/// Render a path with `/` separators regardless of host platform.
#[must_use]
pub fn format_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lexically resolve `.` and `..` without touching the filesystem.
/// `..` never climbs above the root or prefix.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// `relative` joined onto `base`, made absolute and normalized.
pub fn resolve(base: &Path, relative: &str) -> std::io::Result<PathBuf> {
    let joined = base.join(relative);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir()?.join(joined)
    };
    Ok(normalize(&absolute))
}
