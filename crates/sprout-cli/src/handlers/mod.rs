pub mod clean;
pub mod exec;
pub mod init;
pub mod update_check;
pub mod versions;

pub use clean::CleanHandler;
pub use exec::ExecHandler;
pub use init::InitHandler;
pub use update_check::check_for_update;
pub use versions::VersionsHandler;

use owo_colors::OwoColorize;

fn print_header(command: &str, subject: &str) {
    println!(
        "{} {} {}",
        "sprout".bright_green().bold(),
        command.bright_white(),
        subject.bright_white()
    );
    println!();
}
