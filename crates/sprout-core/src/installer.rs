use std::future::Future;
use std::path::{Path, PathBuf};

use crate::download::DownloadClient;
use sprout_error::{Result, SproutError};
use sprout_registry::RegistryClient;
use sprout_store::{StoreManager, cache_path};

/// Fetches and unpacks packages on behalf of a cache entry.
///
/// With a `store_dir` each package lands in its versioned cache path;
/// without one it is unpacked straight into `root`. Implementations must
/// fail rather than leave a partially written cache path behind, and must
/// tolerate being asked for a package that is already present.
pub trait InstallerGateway {
    fn install_packages(
        &self,
        root: &Path,
        store_dir: Option<&Path>,
        packages: &[(String, String)],
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Installs registry tarballs.
pub struct TarballInstaller {
    registry: RegistryClient,
    downloader: DownloadClient,
}

impl TarballInstaller {
    pub fn new(registry: RegistryClient) -> Result<Self> {
        Ok(Self {
            registry,
            downloader: DownloadClient::new()?,
        })
    }

    async fn install_one(
        &self,
        root: &Path,
        store_dir: Option<&Path>,
        name: &str,
        version: &str,
    ) -> Result<PathBuf> {
        let spec = format!("{name}@{version}");
        let metadata = self.registry.fetch_version_metadata(name, version).await?;
        let bytes = self
            .downloader
            .download_tarball(&spec, &metadata.dist.tarball)
            .await?;

        let published = match store_dir {
            Some(store_dir) => StoreManager::publish(&cache_path(store_dir, name, version), &bytes),
            None => StoreManager::overlay(root, &bytes),
        };

        published.map_err(|e| SproutError::InstallFailed(spec, e.to_string()))
    }
}

impl InstallerGateway for TarballInstaller {
    async fn install_packages(
        &self,
        root: &Path,
        store_dir: Option<&Path>,
        packages: &[(String, String)],
    ) -> Result<()> {
        for (name, version) in packages {
            let path = self.install_one(root, store_dir, name, version).await?;
            sprout_logger::debug(&format!("{name}@{version} -> {}", path.display()));
        }
        Ok(())
    }
}
