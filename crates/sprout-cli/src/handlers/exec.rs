use anyhow::{Context, Result};

use crate::config::Settings;
use sprout_constants::command_package;
use sprout_core::{PackageRequest, registry_package};
use sprout_resolver::VersionSpec;
use sprout_runtime::{DEFAULT_INTERPRETER, run_entry};

pub struct ExecHandler;

impl ExecHandler {
    /// Locate the entry file of the package implementing `command`,
    /// installing or updating it first unless a local target path is used.
    pub async fn resolve_entry(settings: &Settings, command: &str) -> Result<String> {
        let name = command_package(command)
            .with_context(|| format!("unresolvable command: {command}"))?
            .to_string();
        let registry = settings.registry_client()?;

        let package = match &settings.target_path {
            Some(target_path) => {
                sprout_logger::debug(&format!("targetPath: {}", target_path.display()));
                registry_package(
                    PackageRequest {
                        target_path: target_path.clone(),
                        store_dir: None,
                        name,
                        version: VersionSpec::Latest,
                    },
                    &registry,
                )?
            }
            None => {
                let target_path = settings.dependencies_root();
                sprout_logger::debug(&format!("targetPath: {}", target_path.display()));

                let mut package = registry_package(
                    PackageRequest {
                        store_dir: Some(Settings::store_dir(&target_path)),
                        target_path,
                        name,
                        version: VersionSpec::Latest,
                    },
                    &registry,
                )?;
                let outcome = package.prepare().await?;
                sprout_logger::debug(&format!("{} at {}", package.name(), outcome.version()));
                package
            }
        };

        package
            .entry_path()?
            .with_context(|| format!("{} declares no entry file", package.name()))
    }

    pub fn run(entry: &str, args: &[String]) -> Result<()> {
        let cwd = std::env::current_dir()?;
        run_entry(DEFAULT_INTERPRETER, entry, args, &cwd)
    }
}
