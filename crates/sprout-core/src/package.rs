use std::path::{Path, PathBuf};

use crate::installer::InstallerGateway;
use sprout_error::{Result, SproutError};
use sprout_project::{find_package_root, read_package_json};
use sprout_registry::VersionSource;
use sprout_resolver::VersionSpec;
use sprout_store::{StoreManager, cache_path};
use sprout_utils::{format_path, resolve, validate_package_name};

/// What a caller asks for. Environment-derived values (cache home, target
/// override) are resolved by the caller and passed in here.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    pub target_path: PathBuf,
    pub store_dir: Option<PathBuf>,
    pub name: String,
    pub version: VersionSpec,
}

/// Fixed when the entry is built.
///
/// `Shared` keeps every version side by side under the store; `Direct`
/// treats the whole target root as a single slot owned by one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachingStrategy {
    Shared { store_dir: PathBuf },
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed(String),
    Updated(String),
    UpToDate(String),
}

impl Outcome {
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::Installed(v) | Self::Updated(v) | Self::UpToDate(v) => v,
        }
    }
}

/// One `(name, version)` package cached relative to a target root.
///
/// Operations are meant to run in order: `exists`, then `install` or
/// `update`, then `entry_path`. Nothing here locks the store against other
/// processes; `InstallerGateway` implementations must tolerate a cache path
/// appearing underneath them.
pub struct Package<S, G> {
    target_path: PathBuf,
    strategy: CachingStrategy,
    name: String,
    requested: VersionSpec,
    pinned: Option<String>,
    source: S,
    installer: G,
}

impl<S: VersionSource, G: InstallerGateway> Package<S, G> {
    pub fn new(request: PackageRequest, source: S, installer: G) -> Result<Self> {
        let name = request.name.trim().to_string();
        validate_package_name(&name).map_err(SproutError::InvalidPackageSpec)?;

        let strategy = match request.store_dir {
            Some(store_dir) => CachingStrategy::Shared { store_dir },
            None => CachingStrategy::Direct,
        };

        Ok(Self {
            target_path: request.target_path,
            strategy,
            name,
            requested: request.version,
            pinned: None,
            source,
            installer,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    #[must_use]
    pub const fn strategy(&self) -> &CachingStrategy {
        &self.strategy
    }

    #[must_use]
    pub const fn requested(&self) -> &VersionSpec {
        &self.requested
    }

    #[must_use]
    pub fn pinned_version(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    #[must_use]
    pub fn store_dir(&self) -> Option<&Path> {
        match &self.strategy {
            CachingStrategy::Shared { store_dir } => Some(store_dir),
            CachingStrategy::Direct => None,
        }
    }

    /// Versioned cache directory. Only defined in shared mode once a
    /// version has been pinned; recomputed on every call.
    #[must_use]
    pub fn cache_path(&self) -> Option<PathBuf> {
        let store_dir = self.store_dir()?;
        let version = self.pinned.as_deref()?;
        Some(cache_path(store_dir, &self.name, version))
    }

    /// Pin the requested version, asking the registry when it is `latest`.
    /// Idempotent: once pinned, no further lookups happen.
    pub async fn resolve_version(&mut self) -> Result<String> {
        if let Some(version) = &self.pinned {
            return Ok(version.clone());
        }

        let version = match &self.requested {
            VersionSpec::Concrete(version) => version.clone(),
            VersionSpec::Latest => self.source.latest_version(&self.name).await?,
        };

        sprout_logger::debug(&format!("{} pinned to {version}", self.name));
        self.pinned = Some(version.clone());
        Ok(version)
    }

    pub async fn exists(&mut self) -> Result<bool> {
        if self.store_dir().is_none() {
            return Ok(self.target_path.exists());
        }

        self.resolve_version().await?;
        let Some(path) = self.cache_path() else {
            return Ok(false);
        };

        let present = path.exists();
        if present && StoreManager::integrity(&path).is_none() {
            sprout_logger::debug(&format!(
                "{} has no integrity marker, trusting its presence",
                path.display()
            ));
        }
        Ok(present)
    }

    /// Fetch the pinned version. Callers check `exists` first.
    pub async fn install(&mut self) -> Result<Outcome> {
        let version = self.resolve_version().await?;

        sprout_logger::status(&format!("Installing {}@{version}...", self.name));
        self.installer
            .install_packages(
                &self.target_path,
                self.store_dir(),
                &[(self.name.clone(), version.clone())],
            )
            .await?;

        Ok(Outcome::Installed(version))
    }

    /// Move to the newest published version, fetching only when that exact
    /// version is not already on disk. Leaves the entry pinned to it.
    pub async fn update(&mut self) -> Result<Outcome> {
        let newest = self.source.latest_version(&self.name).await?;

        if self.holds(&newest) {
            sprout_logger::debug(&format!("{}@{newest} is up to date", self.name));
            self.pinned = Some(newest.clone());
            return Ok(Outcome::UpToDate(newest));
        }

        sprout_logger::status(&format!("Updating {} to {newest}...", self.name));
        self.installer
            .install_packages(
                &self.target_path,
                self.store_dir(),
                &[(self.name.clone(), newest.clone())],
            )
            .await?;

        self.pinned = Some(newest.clone());
        Ok(Outcome::Updated(newest))
    }

    /// `install` when nothing is cached yet, `update` otherwise.
    pub async fn prepare(&mut self) -> Result<Outcome> {
        if self.exists().await? {
            self.update().await
        } else {
            self.install().await
        }
    }

    /// Absolute, `/`-separated path of the package's declared entry file.
    ///
    /// `Ok(None)` when no manifest is found, it cannot be parsed, or it
    /// declares no `main`.
    pub fn entry_path(&self) -> Result<Option<String>> {
        if !self.target_path.exists() {
            return Err(SproutError::TargetMissing(self.target_path.clone()));
        }

        let search_root = self
            .cache_path()
            .filter(|path| path.exists())
            .unwrap_or_else(|| self.target_path.clone());

        let Some(package_root) = find_package_root(&search_root) else {
            sprout_logger::debug(&format!("No manifest at or above {}", search_root.display()));
            return Ok(None);
        };

        let manifest = match read_package_json(&package_root) {
            Ok(manifest) => manifest,
            Err(e) => {
                sprout_logger::debug(&format!("Ignoring unreadable manifest: {e}"));
                return Ok(None);
            }
        };

        let Some(main) = manifest.entry() else {
            return Ok(None);
        };

        let entry = resolve(&package_root, main)?;
        Ok(Some(format_path(&entry)))
    }

    fn holds(&self, version: &str) -> bool {
        match &self.strategy {
            CachingStrategy::Shared { store_dir } => {
                cache_path(store_dir, &self.name, version).exists()
            }
            CachingStrategy::Direct => {
                self.pinned.as_deref() == Some(version)
                    || read_package_json(&self.target_path)
                        .ok()
                        .and_then(|manifest| manifest.version)
                        .is_some_and(|installed| installed == version)
            }
        }
    }
}
