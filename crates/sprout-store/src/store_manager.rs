use sha2::{Digest, Sha256};
use std::{
    fs,
    path::{Path, PathBuf},
};

use sprout_constants::INTEGRITY_MARKER;
use sprout_error::{Result, SproutError};

pub struct StoreManager;

impl StoreManager {
    /// Unpack `tarball_bytes` into `dest` atomically.
    ///
    /// The archive is staged in a temp dir beside `dest` and renamed into
    /// place, so `dest` either does not exist or holds a complete package.
    /// If another process publishes `dest` first, its copy is kept.
    pub fn publish(dest: &Path, tarball_bytes: &[u8]) -> Result<PathBuf> {
        if dest.exists() {
            sprout_logger::debug(&format!("{} already present", dest.display()));
            return Ok(dest.to_path_buf());
        }

        let parent = dest.parent().ok_or_else(|| {
            SproutError::IoError(format!("{} has no parent directory", dest.display()))
        })?;
        fs::create_dir_all(parent)?;

        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(parent)?;
        let package_dir = Self::unpack(staging.path(), tarball_bytes)?;
        Self::write_marker(&package_dir, tarball_bytes)?;

        match fs::rename(&package_dir, dest) {
            Ok(()) => Ok(dest.to_path_buf()),
            Err(_) if dest.exists() => {
                sprout_logger::debug(&format!(
                    "{} was published concurrently, keeping existing copy",
                    dest.display()
                ));
                Ok(dest.to_path_buf())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Unpack `tarball_bytes` over the contents of `root`, overwriting files.
    /// `root` is caller-owned, so no integrity marker is written there.
    pub fn overlay(root: &Path, tarball_bytes: &[u8]) -> Result<PathBuf> {
        let staging = tempfile::tempdir()?;
        let package_dir = Self::unpack(staging.path(), tarball_bytes)?;

        fs::create_dir_all(root)?;
        fs_extra::dir::copy(
            &package_dir,
            root,
            &fs_extra::dir::CopyOptions::new()
                .overwrite(true)
                .content_only(true),
        )
        .map_err(|e| SproutError::IoError(e.to_string()))?;

        Ok(root.to_path_buf())
    }

    /// Recorded tarball digest of a published package, if any.
    #[must_use]
    pub fn integrity(package_dir: &Path) -> Option<String> {
        fs::read_to_string(package_dir.join(INTEGRITY_MARKER))
            .ok()
            .map(|s| s.trim().to_string())
    }

    #[must_use]
    pub fn digest(tarball_bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(tarball_bytes);
        format!("sha256-{:x}", hasher.finalize())
    }

    /// Remove `store_dir` entirely, returning the number of bytes freed.
    pub fn clean(store_dir: &Path) -> Result<u64> {
        if !store_dir.exists() {
            return Ok(0);
        }

        let size =
            fs_extra::dir::get_size(store_dir).map_err(|e| SproutError::IoError(e.to_string()))?;
        fs::remove_dir_all(store_dir).map_err(|e| {
            SproutError::IoError(format!("Failed to clean {}: {e}", store_dir.display()))
        })?;
        Ok(size)
    }

    // Registry tarballs wrap their files in one top-level directory
    // (usually `package/`); that directory becomes the package root.
    fn unpack(staging: &Path, tarball_bytes: &[u8]) -> Result<PathBuf> {
        let unpack_dir = staging.join("content");
        fs::create_dir_all(&unpack_dir)?;

        let tar = flate2::read::GzDecoder::new(tarball_bytes);
        let mut archive = tar::Archive::new(tar);
        archive
            .unpack(&unpack_dir)
            .map_err(|e| SproutError::IoError(format!("Failed to unpack tarball: {e}")))?;

        let entries: Vec<_> = fs::read_dir(&unpack_dir)?.collect::<std::io::Result<Vec<_>>>()?;
        match entries.as_slice() {
            [only] if only.file_type()?.is_dir() => Ok(only.path()),
            _ => Ok(unpack_dir),
        }
    }

    fn write_marker(package_dir: &Path, tarball_bytes: &[u8]) -> Result<()> {
        fs::write(
            package_dir.join(INTEGRITY_MARKER),
            format!("{}\n", Self::digest(tarball_bytes)),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn tarball(files: &[(&str, &str)]) -> std::io::Result<Vec<u8>> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (path, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, content.as_bytes())?;
        }
        builder.into_inner()?.finish()
    }

    #[test]
    fn test_publish_strips_top_level_dir() -> TestResult {
        let store = tempfile::tempdir()?;
        let dest = store.path().join("npm").join("tpl").join("1.0.0");
        let bytes = tarball(&[
            ("package/package.json", r#"{"main":"index.js"}"#),
            ("package/index.js", "module.exports = 1"),
        ])?;

        let published = StoreManager::publish(&dest, &bytes)?;
        assert_eq!(published, dest);
        assert!(dest.join("package.json").is_file());
        assert!(dest.join("index.js").is_file());
        assert_eq!(StoreManager::integrity(&dest), Some(StoreManager::digest(&bytes)));
        Ok(())
    }

    #[test]
    fn test_publish_leaves_no_staging_dirs() -> TestResult {
        let store = tempfile::tempdir()?;
        let dest = store.path().join("1.0.0");
        let bytes = tarball(&[("package/package.json", "{}")])?;

        StoreManager::publish(&dest, &bytes)?;
        let names: Vec<String> = fs::read_dir(store.path())?
            .filter_map(std::result::Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["1.0.0".to_string()]);
        Ok(())
    }

    #[test]
    fn test_publish_keeps_existing_copy() -> TestResult {
        let store = tempfile::tempdir()?;
        let dest = store.path().join("1.0.0");
        fs::create_dir_all(&dest)?;
        fs::write(dest.join("package.json"), r#"{"name":"first"}"#)?;

        let bytes = tarball(&[("package/package.json", r#"{"name":"second"}"#)])?;
        StoreManager::publish(&dest, &bytes)?;

        assert_eq!(fs::read_to_string(dest.join("package.json"))?, r#"{"name":"first"}"#);
        Ok(())
    }

    #[test]
    fn test_publish_garbage_fails_without_dest() -> TestResult {
        let store = tempfile::tempdir()?;
        let dest = store.path().join("1.0.0");

        assert!(StoreManager::publish(&dest, b"definitely not gzip").is_err());
        assert!(!dest.exists());
        Ok(())
    }

    #[test]
    fn test_overlay_overwrites_root() -> TestResult {
        let root = tempfile::tempdir()?;
        fs::write(root.path().join("index.js"), "old")?;
        fs::write(root.path().join("keep.txt"), "mine")?;

        let bytes = tarball(&[("package/index.js", "new")])?;
        StoreManager::overlay(root.path(), &bytes)?;

        assert_eq!(fs::read_to_string(root.path().join("index.js"))?, "new");
        assert_eq!(fs::read_to_string(root.path().join("keep.txt"))?, "mine");
        assert!(!root.path().join(INTEGRITY_MARKER).exists());
        assert_eq!(StoreManager::integrity(root.path()), None);
        Ok(())
    }

    #[test]
    fn test_clean_reports_size() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = dir.path().join("node_modules");
        fs::create_dir_all(store.join("npm"))?;
        fs::write(store.join("npm").join("blob"), vec![0u8; 2048])?;

        assert!(StoreManager::clean(&store)? >= 2048);
        assert!(!store.exists());
        assert_eq!(StoreManager::clean(&store)?, 0);
        Ok(())
    }
}
