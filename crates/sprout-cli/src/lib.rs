pub mod commands;
pub mod config;
pub mod handlers;

use clap::Parser;
use sprout_constants::ENV_REGISTRY;
use sprout_error::SproutError;

pub use commands::{Cli, Commands};
pub use config::Settings;
use handlers::{CleanHandler, ExecHandler, InitHandler, VersionsHandler, check_for_update};

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.target_path.clone(), cli.debug)?;
    sprout_logger::init_logger(settings.verbosity);
    sprout_logger::debug(&format!("cli home: {}", settings.cli_home.display()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match &cli.command {
        Commands::Init {
            project_name,
            template,
            force,
        } => runtime.block_on(async {
            check_for_update(&settings.registry_client()?).await;
            InitHandler::handle(&settings, project_name.as_deref(), template, *force).await
        }),
        Commands::Exec { command, args } => {
            let entry = runtime.block_on(async {
                check_for_update(&settings.registry_client()?).await;
                ExecHandler::resolve_entry(&settings, command).await
            })?;
            ExecHandler::run(&entry, args)
        }
        Commands::Versions { name } => {
            runtime.block_on(VersionsHandler::handle(&settings, name))
        }
        Commands::Clean => CleanHandler::handle(&settings),
    }
}

/// A follow-up suggestion for failures the user can act on.
#[must_use]
pub fn hint_for(err: &anyhow::Error) -> Option<String> {
    let err = err.chain().find_map(|e| e.downcast_ref::<SproutError>())?;
    if err.is_not_found() {
        Some(format!(
            "check the package name, or set {ENV_REGISTRY} to the registry that publishes it"
        ))
    } else if err.is_unreachable() {
        Some(format!(
            "check your network connection, or set {ENV_REGISTRY} to a reachable mirror"
        ))
    } else {
        None
    }
}
