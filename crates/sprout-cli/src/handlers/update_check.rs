use sprout_constants::{BIN_NAME, SELF_PACKAGE, VERSION};
use sprout_registry::RegistryClient;
use sprout_resolver::is_newer;

/// Warn when a newer compatible release of this tool is published.
/// Never fails: problems reaching the registry are only logged in debug mode.
pub async fn check_for_update(registry: &RegistryClient) {
    match registry.semver_version(SELF_PACKAGE, VERSION).await {
        Ok(Some(latest)) if is_newer(&latest, VERSION) => {
            sprout_logger::warn(&format!(
                "please update {BIN_NAME}: current version {VERSION}, latest version {latest}"
            ));
        }
        Ok(_) => sprout_logger::debug(&format!("{BIN_NAME} {VERSION} is current")),
        Err(e) => sprout_logger::debug(&format!("Skipped update check: {e}")),
    }
}
