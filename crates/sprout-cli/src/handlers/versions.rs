use anyhow::Result;
use owo_colors::OwoColorize;

use super::print_header;
use crate::config::Settings;
use sprout_resolver::{select_latest, sort_versions};

pub struct VersionsHandler;

impl VersionsHandler {
    pub async fn handle(settings: &Settings, name: &str) -> Result<()> {
        print_header("versions", name);

        let registry = settings.registry_client()?;
        let mut versions = registry.fetch_versions(name).await?;
        if versions.is_empty() {
            sprout_logger::warn(&format!("{name} has no published versions"));
            return Ok(());
        }

        sort_versions(&mut versions);
        let latest = select_latest(&versions).ok();
        for version in &versions {
            if latest.as_deref() == Some(version.as_str()) {
                println!("  {} {}", version.bright_green().bold(), "(latest)".bright_black());
            } else {
                println!("  {version}");
            }
        }

        Ok(())
    }
}
