use anyhow::Result;

use super::print_header;
use crate::config::Settings;
use sprout_store::StoreManager;

pub struct CleanHandler;

impl CleanHandler {
    pub fn handle(settings: &Settings) -> Result<()> {
        print_header("clean", &settings.cli_home.display().to_string());

        let mut freed = 0u64;
        for root in [settings.template_root(), settings.dependencies_root()] {
            let store = Settings::store_dir(&root);
            if !store.exists() {
                continue;
            }
            sprout_logger::debug(&format!("Cleaning cache at: {}", store.display()));
            freed += StoreManager::clean(&store)?;
        }

        if freed == 0 {
            sprout_logger::info("No package cache found to clean.");
            return Ok(());
        }

        #[allow(clippy::cast_precision_loss)]
        let size_mb = freed as f64 / 1024.0 / 1024.0;
        sprout_logger::finish(&format!("Cleaned {size_mb:.2} MB of cached packages"));
        Ok(())
    }
}
