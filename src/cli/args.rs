//! CLI argument definitions
//!
//! All Clap derive structs for `reviewdeck` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::{LogFormat, LoggingOptions};
use crate::registry::Severity;
use crate::server::DEFAULT_BIND;

// ============================================================================
// Root CLI
// ============================================================================

/// Code review dashboard: serve or export the built-in review documents.
#[derive(Parser, Debug)]
#[command(name = "reviewdeck", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "REVIEWDECK_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "REVIEWDECK_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to a YAML site configuration file.
    #[arg(short, long, global = true, env = "REVIEWDECK_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Logging setup selected by the global flags.
    #[must_use]
    pub const fn logging_options(&self) -> LoggingOptions {
        LoggingOptions {
            format: self.log_format,
            verbosity: self.verbose,
            quiet: self.quiet,
            color: self.color,
        }
    }
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the dashboard over HTTP.
    Serve(ServeArgs),

    /// Write the dashboard as a static site.
    Export(ExportArgs),

    /// List the review documents.
    List(ListArgs),

    /// Print one review document.
    Show(ShowArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address as `[host:]port`.
    #[arg(short, long, default_value = DEFAULT_BIND, env = "REVIEWDECK_BIND")]
    pub bind: String,
}

/// Arguments for `export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output directory (created if missing).
    #[arg(short, long, env = "REVIEWDECK_OUT_DIR")]
    pub out: PathBuf,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list documents of this severity.
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Document id (see `reviewdeck list`).
    pub id: String,

    /// Print the rendered HTML fragment instead of markdown.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for commands that print data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
