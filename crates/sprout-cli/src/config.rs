use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sprout_constants::{
    DEFAULT_CLI_HOME, DEFAULT_REGISTRY, DEPENDENCIES_DIR, ENV_HOME, ENV_LOG_LEVEL, ENV_REGISTRY,
    ENV_TARGET_PATH, ENV_TIMEOUT, REQUEST_TIMEOUT_SECS, STORE_DIR, TEMPLATE_DIR,
};
use sprout_logger::Verbosity;
use sprout_registry::RegistryClient;

/// Values the bootstrap reads from the environment and hands to the core.
#[derive(Debug, Clone)]
pub struct Settings {
    pub home: PathBuf,
    pub cli_home: PathBuf,
    pub registry: String,
    pub target_path: Option<PathBuf>,
    pub verbosity: Verbosity,
    pub timeout: Duration,
}

impl Settings {
    pub fn load(target_path: Option<PathBuf>, debug: bool) -> anyhow::Result<Self> {
        let home = dirs::home_dir()
            .filter(|home| home.exists())
            .context("current user home directory does not exist")?;

        let dotenv = home.join(".env");
        if dotenv.is_file() {
            dotenvy::from_path(&dotenv)
                .with_context(|| format!("Failed to load {}", dotenv.display()))?;
        }

        let cwd = std::env::current_dir()?;
        Ok(Self::from_vars(home, &cwd, target_path, debug, |key| {
            std::env::var(key).ok()
        }))
    }

    pub fn from_vars(
        home: PathBuf,
        cwd: &Path,
        target_path: Option<PathBuf>,
        debug: bool,
        var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let var = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        let cli_home = var(ENV_HOME).map_or_else(|| home.join(DEFAULT_CLI_HOME), |h| home.join(h));
        let target_path = target_path
            .or_else(|| var(ENV_TARGET_PATH).map(PathBuf::from))
            .map(|p| cwd.join(p));
        let timeout = var(ENV_TIMEOUT)
            .and_then(|secs| secs.trim().parse().ok())
            .unwrap_or(REQUEST_TIMEOUT_SECS);

        Self {
            cli_home,
            registry: var(ENV_REGISTRY).unwrap_or_else(|| DEFAULT_REGISTRY.to_string()),
            target_path,
            verbosity: if debug {
                Verbosity::Verbose
            } else {
                var(ENV_LOG_LEVEL)
                    .and_then(|level| Verbosity::from_level(&level))
                    .unwrap_or(Verbosity::Normal)
            },
            timeout: Duration::from_secs(timeout),
            home,
        }
    }

    /// Cache root for project templates.
    #[must_use]
    pub fn template_root(&self) -> PathBuf {
        self.cli_home.join(TEMPLATE_DIR)
    }

    /// Cache root for command packages run through `exec`.
    #[must_use]
    pub fn dependencies_root(&self) -> PathBuf {
        self.cli_home.join(DEPENDENCIES_DIR)
    }

    #[must_use]
    pub fn store_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn registry_client(&self) -> anyhow::Result<RegistryClient> {
        Ok(RegistryClient::new(&self.registry, self.timeout)?)
    }
}
