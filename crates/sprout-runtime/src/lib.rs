use std::path::Path;
use std::process::Command;

use anyhow::{Context, bail};

/// Program used to execute package entry files.
pub const DEFAULT_INTERPRETER: &str = "node";

/// Run `entry` with `interpreter` in a child process, forwarding `args`.
///
/// Entry files are never loaded in-process; the child inherits stdio and
/// its exit status decides success.
pub fn run_entry(interpreter: &str, entry: &str, args: &[String], cwd: &Path) -> anyhow::Result<()> {
    if !Path::new(entry).is_file() {
        bail!("Entry file {entry} does not exist");
    }

    sprout_logger::debug(&format!("{interpreter} {entry} {}", args.join(" ")));

    let status = build_command(interpreter, entry, args, cwd)
        .status()
        .with_context(|| format!("Failed to start '{interpreter}'"))?;

    if !status.success() {
        bail!(
            "{entry} exited with code {}",
            status.code().map_or_else(|| "unknown".to_string(), |c| c.to_string())
        );
    }

    Ok(())
}

fn build_command(interpreter: &str, entry: &str, args: &[String], cwd: &Path) -> Command {
    let mut command = if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", interpreter]);
        cmd
    } else {
        Command::new(interpreter)
    };

    command.arg(entry).args(args).current_dir(cwd);
    command
}
