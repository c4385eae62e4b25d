use crossterm::tty::IsTty;
use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How much the CLI prints. Errors are shown at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Map a `SPROUT_LOG_LEVEL` value (npm log level names) onto a verbosity.
    #[must_use]
    pub fn from_level(level: &str) -> Option<Self> {
        match level.trim().to_ascii_lowercase().as_str() {
            "silent" | "quiet" | "error" => Some(Self::Quiet),
            "warn" | "notice" | "info" => Some(Self::Normal),
            "verbose" | "debug" | "silly" => Some(Self::Verbose),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl LogLevel {
    #[must_use]
    pub const fn stream(self) -> Stream {
        match self {
            Self::Warning | Self::Error => Stream::Stderr,
            Self::Info | Self::Success | Self::Debug => Stream::Stdout,
        }
    }

    const fn threshold(self) -> Verbosity {
        match self {
            Self::Error => Verbosity::Quiet,
            Self::Debug => Verbosity::Verbose,
            Self::Info | Self::Success | Self::Warning => Verbosity::Normal,
        }
    }
}

pub struct Logger {
    start_time: Instant,
    verbosity: Verbosity,
    // A `status` line is on screen and has no trailing newline yet.
    status_shown: AtomicBool,
}

impl Logger {
    #[must_use]
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            start_time: Instant::now(),
            verbosity,
            status_shown: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.verbosity >= level.threshold()
    }

    fn clear_status(&self) {
        if !self.status_shown.swap(false, Ordering::Relaxed) {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    #[must_use]
    pub fn format(level: LogLevel, message: &str) -> String {
        let (prefix, colored_message) = match level {
            LogLevel::Info => (
                "sprout".bright_green().bold().to_string(),
                message.white().to_string(),
            ),
            LogLevel::Success => (
                "✓".bright_green().bold().to_string(),
                message.bright_green().to_string(),
            ),
            LogLevel::Warning => (
                "⚠".bright_yellow().bold().to_string(),
                message.bright_yellow().to_string(),
            ),
            LogLevel::Error => (
                "✗".bright_red().bold().to_string(),
                message.bright_red().to_string(),
            ),
            LogLevel::Debug => (
                "•".bright_black().bold().to_string(),
                message.bright_black().to_string(),
            ),
        };

        format!("{prefix} {colored_message}")
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        self.clear_status();
        let line = Self::format(level, message);
        match level.stream() {
            Stream::Stderr => eprintln!("{line}"),
            Stream::Stdout => println!("{line}"),
        }
    }

    /// Transient progress line, replaced by whatever is logged next.
    /// Skipped when stdout is not a terminal.
    pub fn status(&self, message: &str) {
        if self.verbosity == Verbosity::Quiet || !io::stdout().is_tty() {
            return;
        }

        self.clear_status();
        print!("{} {}", "◦".bright_cyan(), message.bright_white());
        let _ = io::stdout().flush();
        self.status_shown.store(true, Ordering::Relaxed);
    }

    pub fn finish(&self, message: &str) {
        if !self.enabled(LogLevel::Success) {
            return;
        }

        self.clear_status();
        println!(
            "{} {} {}",
            "✓".bright_green().bold(),
            message.bright_green(),
            format!("[{}]", format_elapsed(self.start_time.elapsed())).bright_black()
        );
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_millis() < 1000 {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(verbosity: Verbosity) {
    let _ = LOGGER.set(Logger::new(verbosity));
}

// Library code may log before the binary has configured anything.
fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Verbosity::Normal))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().info(message);
}

pub fn success(message: &str) {
    get_logger().success(message);
}

pub fn warn(message: &str) {
    get_logger().warn(message);
}

pub fn error(message: &str) {
    get_logger().error(message);
}

pub fn debug(message: &str) {
    get_logger().debug(message);
}

pub fn finish(message: &str) {
    get_logger().finish(message);
}
