use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sprout_constants::DESCRIPTION;

#[derive(Parser, Debug)]
#[command(name = "sprout")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = DESCRIPTION, long_about = None)]
pub struct Cli {
    /// Enable debug mode for verbose output
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,
    /// Use a local package directory instead of the cache (for developing commands)
    #[arg(long = "target-path", global = true, value_name = "DIR")]
    pub target_path: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetches a project template into the local cache and shows its entry file
    Init {
        /// Name of the project to create
        project_name: Option<String>,
        /// Template package, optionally with a version (e.g. vue-template@1.2.0)
        #[arg(short, long)]
        template: String,
        /// Re-download the template even when it is cached
        #[arg(short, long)]
        force: bool,
    },
    /// Runs a command implemented by a published package
    Exec {
        /// The command to run (e.g. init)
        command: String,
        /// Arguments passed through to the command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Lists the published versions of a package
    #[command(alias = "ls")]
    Versions {
        /// Package name (e.g. @sprout-cli/init)
        name: String,
    },
    /// Removes every cached template and command package
    Clean,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_init_with_globals() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "sprout",
            "init",
            "my-app",
            "--template",
            "vue-template@1.0.0",
            "--debug",
            "--target-path",
            "/tmp/local",
        ])?;

        assert!(cli.debug);
        assert_eq!(cli.target_path, Some(PathBuf::from("/tmp/local")));
        match cli.command {
            Commands::Init {
                project_name,
                template,
                force,
            } => {
                assert_eq!(project_name.as_deref(), Some("my-app"));
                assert_eq!(template, "vue-template@1.0.0");
                assert!(!force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_exec_passes_through_flags() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["sprout", "exec", "init", "my-app", "--force"])?;

        match cli.command {
            Commands::Exec { command, args } => {
                assert_eq!(command, "init");
                assert_eq!(args, vec!["my-app".to_string(), "--force".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_init_requires_template() {
        assert!(Cli::try_parse_from(["sprout", "init", "my-app"]).is_err());
    }
}
