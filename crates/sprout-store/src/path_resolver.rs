use std::path::{Path, PathBuf};

pub struct PathResolver;

impl PathResolver {
    /// `<store>/npm/<sanitized name>/<version>`
    #[must_use]
    pub fn cache_path(store_base: &Path, package_name: &str, version: &str) -> PathBuf {
        Self::package_base_path(store_base, package_name).join(version)
    }

    #[must_use]
    pub fn package_base_path(store_base: &Path, package_name: &str) -> PathBuf {
        store_base
            .join("npm")
            .join(Self::sanitize_package_name(package_name))
    }

    /// Map a name onto a single path segment. Every `_` is doubled before
    /// the markers are introduced, so the mapping is reversible and distinct
    /// names never share a directory.
    #[must_use]
    pub fn sanitize_package_name(package_name: &str) -> String {
        let mut sanitized = String::with_capacity(package_name.len() + 8);
        for (i, c) in package_name.chars().enumerate() {
            match c {
                '_' => sanitized.push_str("__"),
                '@' => sanitized.push_str("_at_"),
                '/' => sanitized.push_str("_slash_"),
                '\\' => sanitized.push_str("_bslash_"),
                '.' if i == 0 => sanitized.push_str("_dot_"),
                c => sanitized.push(c),
            }
        }
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_is_pure() {
        let store = Path::new("/home/u/.sprout/template/node_modules");
        assert_eq!(
            PathResolver::cache_path(store, "vue-tpl", "1.0.0"),
            PathResolver::cache_path(store, "vue-tpl", "1.0.0")
        );
        assert_eq!(
            PathResolver::cache_path(store, "vue-tpl", "1.0.0"),
            store.join("npm").join("vue-tpl").join("1.0.0")
        );
    }

    #[test]
    fn test_distinct_versions_distinct_paths() {
        let store = Path::new("/store");
        assert_ne!(
            PathResolver::cache_path(store, "vue-tpl", "1.0.0"),
            PathResolver::cache_path(store, "vue-tpl", "1.0.1")
        );
    }

    #[test]
    fn test_scoped_name_is_single_segment() {
        let path = PathResolver::cache_path(Path::new("/store"), "@sprout-cli/init", "0.1.0");
        assert_eq!(
            path,
            Path::new("/store/npm/_at_sprout-cli_slash_init/0.1.0")
        );
        assert_eq!(path.components().count(), 5);
    }

    #[test]
    fn test_scoped_and_plain_do_not_collide() {
        let store = Path::new("/store");
        assert_ne!(
            PathResolver::cache_path(store, "@a/b", "1.0.0"),
            PathResolver::cache_path(store, "a-b", "1.0.0")
        );
    }

    #[test]
    fn test_separators_never_reach_the_path() {
        let store = Path::new("/store");
        let base = store.join("npm");
        for name in ["../../../victim", "tpl/", "a\\b", "..", "./x"] {
            let path = PathResolver::cache_path(store, name, "1.0.0");
            assert_eq!(path.parent().and_then(Path::parent), Some(base.as_path()), "{name}");
        }
    }

    #[test]
    fn test_sanitized_names_are_distinct() {
        let names = [
            "tpl",
            "tpl/",
            "@a_slash_b/c",
            "@a/b_slash_c",
            "_at_a/b",
            "@a/b",
            "a-b",
            "..",
            "_dot_.",
        ];
        let mut seen = std::collections::HashSet::new();
        for name in names {
            assert!(
                seen.insert(PathResolver::sanitize_package_name(name)),
                "{name} collides"
            );
        }
    }
}
