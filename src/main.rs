//! `reviewdeck` - code review dashboard

use clap::Parser;
use tokio_util::sync::CancellationToken;

use reviewdeck::cli::args::Cli;
use reviewdeck::cli::commands;
use reviewdeck::cli::signals::SignalListener;
use reviewdeck::error::ExitCode;
use reviewdeck::observability::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&cli.logging_options());

    let cancel = CancellationToken::new();

    // First signal cancels; a second one exits immediately
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        let mut signals = SignalListener::new();
        signals.recv().await;

        eprintln!("\nShutting down gracefully... (press Ctrl+C again to force)");
        signal_cancel.cancel();

        let forced = signals.recv().await;
        std::process::exit(forced.exit_code());
    });

    let result = commands::dispatch(cli, cancel).await;

    match result {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
