use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Component;

use super::print_header;
use crate::config::Settings;
use sprout_core::{InstallerGateway, Outcome, Package, PackageRequest, registry_package};
use sprout_registry::VersionSource;
use sprout_resolver::VersionSpec;
use sprout_utils::parse_package_spec;

pub struct InitHandler;

impl InitHandler {
    pub async fn handle(
        settings: &Settings,
        project_name: Option<&str>,
        template: &str,
        force: bool,
    ) -> Result<()> {
        print_header("init", project_name.unwrap_or(template));

        let (name, version) = parse_package_spec(template);
        let version: VersionSpec = version.parse()?;

        let target_path = settings.template_root();
        let request = PackageRequest {
            store_dir: Some(Settings::store_dir(&target_path)),
            target_path,
            name,
            version,
        };

        let registry = settings.registry_client()?;
        let mut package = registry_package(request, &registry)?;

        let outcome = fetch_template(&mut package, force).await?;

        let spec = format!("{}@{}", package.name(), outcome.version());
        match &outcome {
            Outcome::Installed(_) => sprout_logger::success(&format!("Installed {spec}")),
            Outcome::Updated(_) => sprout_logger::success(&format!("Updated to {spec}")),
            Outcome::UpToDate(_) => sprout_logger::info(&format!("{spec} is up to date")),
        }

        if let Some(cached) = package.cache_path() {
            sprout_logger::info(&format!("Template cached at {}", cached.display()));
        }
        match package.entry_path()? {
            Some(entry) => sprout_logger::info(&format!("Entry file: {entry}")),
            None => sprout_logger::warn(&format!("{spec} declares no entry file")),
        }

        sprout_logger::finish("Template ready");
        Ok(())
    }
}

/// Bring a template into the cache. With `force`, an existing copy of the
/// pinned version is deleted and fetched again; only a directory strictly
/// inside the store is ever removed.
pub async fn fetch_template<S: VersionSource, G: InstallerGateway>(
    package: &mut Package<S, G>,
    force: bool,
) -> Result<Outcome> {
    if !(force && package.exists().await?) {
        return Ok(package.prepare().await?);
    }

    if let (Some(store_dir), Some(cached)) = (package.store_dir(), package.cache_path()) {
        let contained = cached.strip_prefix(store_dir).is_ok_and(|rest| {
            rest.components().all(|c| matches!(c, Component::Normal(_)))
        });
        if !contained {
            bail!(
                "refusing to remove {}: not inside {}",
                cached.display(),
                store_dir.display()
            );
        }

        sprout_logger::debug(&format!("Removing cached copy at {}", cached.display()));
        fs::remove_dir_all(&cached)
            .with_context(|| format!("Failed to remove {}", cached.display()))?;
    }

    Ok(package.install().await?)
}
