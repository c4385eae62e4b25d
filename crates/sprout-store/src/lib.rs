pub mod path_resolver;
pub mod store_manager;

pub use path_resolver::PathResolver;
pub use store_manager::StoreManager;

use std::path::{Path, PathBuf};

/// Deterministic cache location of one `(name, version)` under `store_dir`.
#[must_use]
pub fn cache_path(store_dir: &Path, name: &str, version: &str) -> PathBuf {
    PathResolver::cache_path(store_dir, name, version)
}
