//! Process signal handling for graceful shutdown.

use tokio::signal::unix::{Signal, SignalKind, signal};
use tracing::warn;

use crate::error::ExitCode;

/// A shutdown request received from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT (Ctrl+C).
    Interrupt,
    /// SIGTERM.
    Terminate,
}

impl ShutdownSignal {
    /// Exit code used when this signal forces an exit.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Interrupt => ExitCode::INTERRUPTED,
            Self::Terminate => ExitCode::TERMINATED,
        }
    }
}

/// Waits for SIGINT or SIGTERM.
///
/// If SIGTERM cannot be registered, only Ctrl+C is observed.
#[derive(Debug)]
pub struct SignalListener {
    sigterm: Option<Signal>,
}

impl SignalListener {
    /// Registers the SIGTERM handler; a failure is logged, not fatal.
    #[must_use]
    pub fn new() -> Self {
        let sigterm = signal(SignalKind::terminate())
            .inspect_err(|e| warn!(error = %e, "failed to register SIGTERM handler"))
            .ok();
        Self { sigterm }
    }

    /// Listener that only observes Ctrl+C.
    #[must_use]
    pub const fn interrupt_only() -> Self {
        Self { sigterm: None }
    }

    /// Waits for the next shutdown signal.
    pub async fn recv(&mut self) -> ShutdownSignal {
        match self.sigterm.as_mut() {
            Some(sigterm) => tokio::select! {
                () = interrupt() => ShutdownSignal::Interrupt,
                _ = sigterm.recv() => ShutdownSignal::Terminate,
            },
            None => {
                interrupt().await;
                ShutdownSignal::Interrupt
            }
        }
    }
}

impl Default for SignalListener {
    fn default() -> Self {
        Self::new()
    }
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
