pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Scaffold projects and components from published templates";
pub const BIN_NAME: &str = "sprout";
pub const SELF_PACKAGE: &str = "sprout-cli";

pub const USER_AGENT: &str = concat!("sprout/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const LATEST_TAG: &str = "latest";
pub const MANIFEST_FILE: &str = "package.json";
pub const INTEGRITY_MARKER: &str = ".sprout-integrity";

pub const DEFAULT_CLI_HOME: &str = ".sprout";
pub const TEMPLATE_DIR: &str = "template";
pub const DEPENDENCIES_DIR: &str = "dependencies";
pub const STORE_DIR: &str = "node_modules";

pub const ENV_HOME: &str = "SPROUT_HOME";
pub const ENV_REGISTRY: &str = "SPROUT_REGISTRY";
pub const ENV_TARGET_PATH: &str = "SPROUT_TARGET_PATH";
pub const ENV_LOG_LEVEL: &str = "SPROUT_LOG_LEVEL";
pub const ENV_TIMEOUT: &str = "SPROUT_REGISTRY_TIMEOUT";

/// Commands dispatched through `sprout exec` and the package that implements each.
pub const COMMAND_PACKAGES: &[(&str, &str)] = &[
    ("init", "@sprout-cli/init"),
    ("publish", "@sprout-cli/publish"),
];

#[must_use]
pub fn command_package(command: &str) -> Option<&'static str> {
    COMMAND_PACKAGES
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, pkg)| *pkg)
}
