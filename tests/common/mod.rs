//! Shared integration-test harness for running the `reviewdeck` binary,
//! either as a one-shot command or as a long-running HTTP server.

#![allow(dead_code)]

use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};

/// Timeout for the server to report its bound address.
pub const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs `reviewdeck` with `args` to completion and captures its output.
#[allow(clippy::missing_panics_doc)]
pub fn run_command(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_reviewdeck"))
        .args(args)
        .env_remove("REVIEWDECK_CONFIG")
        .env_remove("REVIEWDECK_BIND")
        .env_remove("REVIEWDECK_LOG_LEVEL")
        .output()
        .expect("failed to run reviewdeck")
}

/// A running `reviewdeck serve` process on an ephemeral port.
///
/// The child process is killed on drop via `kill_on_drop(true)`.
pub struct ReviewDeckServer {
    child: Child,
    base_url: String,
    client: reqwest::Client,
}

impl ReviewDeckServer {
    /// Spawns `serve --bind 127.0.0.1:0 -v` plus `extra_args`.
    ///
    /// Reads stderr until the "HTTP server listening" line to discover the port.
    #[allow(clippy::missing_panics_doc)]
    pub async fn start(extra_args: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_reviewdeck"))
            .args(["serve", "--bind", "127.0.0.1:0", "-v", "--color", "never"])
            .args(extra_args)
            .env_remove("REVIEWDECK_CONFIG")
            .env_remove("REVIEWDECK_LOG_LEVEL")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn reviewdeck");

        let stderr = child.stderr.take().expect("stderr not captured");
        let mut reader = BufReader::new(stderr);
        let mut line = String::new();
        let mut port: Option<u16> = None;

        let deadline = tokio::time::Instant::now() + STARTUP_TIMEOUT;
        while tokio::time::Instant::now() < deadline {
            line.clear();
            let n = tokio::time::timeout(Duration::from_secs(5), reader.read_line(&mut line))
                .await
                .expect("timed out waiting for HTTP server startup")
                .expect("failed to read stderr");
            assert!(n > 0, "server exited before printing listening address");

            if line.contains("HTTP server listening") {
                if let Some(start) = line.find("127.0.0.1:") {
                    let digits: String = line[start + "127.0.0.1:".len()..]
                        .chars()
                        .take_while(char::is_ascii_digit)
                        .collect();
                    port = digits.parse().ok();
                }
                break;
            }
        }

        let port = port.expect("failed to discover HTTP server port from stderr");

        // Keep draining stderr so the child never blocks on a full pipe
        tokio::spawn(async move {
            let mut sink = String::new();
            while matches!(reader.read_line(&mut sink).await, Ok(n) if n > 0) {
                sink.clear();
            }
        });

        Self {
            child,
            base_url: format!("http://127.0.0.1:{port}"),
            client: reqwest::Client::new(),
        }
    }

    /// Full URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issues a GET and returns the response.
    #[allow(clippy::missing_panics_doc)]
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
    }

    /// Kills the server and waits for it to exit.
    #[allow(clippy::missing_panics_doc)]
    pub async fn shutdown(mut self) {
        self.child.kill().await.expect("failed to kill child");
    }
}
