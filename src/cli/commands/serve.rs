//! `serve` command handler.

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::args::ServeArgs;
use crate::config::load_or_default;
use crate::error::ReviewDeckError;
use crate::registry::Registry;
use crate::server::{AppState, HttpServer, parse_bind_addr};

/// Serves the dashboard until `cancel` fires.
///
/// # Errors
///
/// Returns a configuration error if the site file is invalid, or a server
/// error if the address cannot be bound.
pub async fn run(
    args: &ServeArgs,
    config: Option<&Path>,
    cancel: CancellationToken,
) -> Result<(), ReviewDeckError> {
    let site = load_or_default(config)?;
    let registry = Arc::new(Registry::builtin().clone());
    let state = Arc::new(AppState::new(registry, site)?);

    let addr = parse_bind_addr(&args.bind)?;
    let server = HttpServer::bind(&addr, state).await?;
    info!(
        url = %format!("http://{}/", server.local_addr()),
        documents = Registry::builtin().len(),
        "dashboard ready"
    );

    server.run(cancel).await?;
    Ok(())
}
