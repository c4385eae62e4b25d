use std::fs;
use std::path::{Path, PathBuf};

use crate::package_json::PackageJson;
use sprout_constants::MANIFEST_FILE;
use sprout_error::{Result, SproutError};

pub fn read_package_json(package_dir: &Path) -> Result<PackageJson> {
    let path = package_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content)
        .map_err(|e| SproutError::IoError(format!("{}: {e}", path.display())))
}

/// Nearest directory at or above `start` that holds a package manifest.
#[must_use]
pub fn find_package_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(MANIFEST_FILE).is_file())
        .map(Path::to_path_buf)
}
