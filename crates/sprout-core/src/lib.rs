pub mod download;
pub mod installer;
pub mod package;

pub use download::DownloadClient;
pub use installer::{InstallerGateway, TarballInstaller};
pub use package::{CachingStrategy, Outcome, Package, PackageRequest};

use sprout_error::Result;
use sprout_registry::RegistryClient;

/// A cache entry backed by the real registry and tarball installer.
pub type RegistryPackage = Package<RegistryClient, TarballInstaller>;

pub fn registry_package(request: PackageRequest, registry: &RegistryClient) -> Result<RegistryPackage> {
    let installer = TarballInstaller::new(registry.clone())?;
    Package::new(request, registry.clone(), installer)
}
