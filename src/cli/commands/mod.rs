//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod documents;
pub mod export;
pub mod serve;
pub mod version;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::error::ReviewDeckError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` is fired by the signal handler; only long-running commands
/// observe it.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), ReviewDeckError> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Serve(args) => serve::run(args, config, cancel).await,
        Commands::Export(args) => export::run(args, config),
        Commands::List(args) => documents::list(args),
        Commands::Show(args) => documents::show(args, config),
        Commands::Completions(args) => {
            completions::run(args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(args);
            Ok(())
        }
    }
}
