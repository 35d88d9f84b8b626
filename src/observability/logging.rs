//! Logging initialization for `reviewdeck`.
//!
//! Everything goes to stderr through `tracing`, as human-readable lines or
//! newline-delimited JSON. `REVIEWDECK_LOG_LEVEL` replaces the filter built
//! from the CLI flags.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable overriding the verbosity flags.
pub const LOG_LEVEL_ENV: &str = "REVIEWDECK_LOG_LEVEL";

/// HTTP stack crates capped at `info` so `-vv`/`-vvv` trace the dashboard,
/// not every socket read.
const DEPENDENCY_CEILING: &[&str] = &["hyper=info", "hyper_util=info", "h2=info", "tower=info"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// How the subscriber is set up, derived from the global CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggingOptions {
    /// Output format.
    pub format: LogFormat,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// `-q`: only errors are logged.
    pub quiet: bool,
    /// Color choice for human output.
    pub color: ColorChoice,
}

impl LoggingOptions {
    /// Filter directives used when `REVIEWDECK_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_directives(&self) -> String {
        let level = if self.quiet {
            "error"
        } else {
            verbosity_to_directive(self.verbosity)
        };
        if matches!(level, "debug" | "trace") {
            let mut directives = level.to_string();
            for ceiling in DEPENDENCY_CEILING {
                directives.push(',');
                directives.push_str(ceiling);
            }
            directives
        } else {
            level.to_string()
        }
    }

    /// Whether targets are printed (from `-vv` on).
    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.verbosity >= 2
    }
}

/// Maps a verbosity level to a tracing level directive.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"` (saturates)
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Resolves `--color` against the terminal and `NO_COLOR`.
#[must_use]
pub const fn ansi_enabled(color: ColorChoice, stderr_is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Auto => stderr_is_terminal && !no_color,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Initializes the global tracing subscriber.
///
/// Uses `try_init()`, so later calls (e.g. from tests) are no-ops.
pub fn init_logging(options: &LoggingOptions) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(options.default_directives()));

    match options.format {
        LogFormat::Human => {
            let use_ansi = ansi_enabled(
                options.color,
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            );
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_ansi)
                .with_target(options.show_target())
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(options.show_target())
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
