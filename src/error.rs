//! Error types for `reviewdeck`
//!
//! One top-level error aggregating the per-module errors, plus the process
//! exit codes each variant maps to.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `reviewdeck` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, unknown theme)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// HTTP server error (bind failed)
    pub const SERVER_ERROR: i32 = 4;

    /// Usage error (invalid arguments, unknown document)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `reviewdeck` operations.
#[derive(Debug, Error)]
pub enum ReviewDeckError {
    /// Site configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Document registry invariant violated
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Markdown or page rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// HTTP server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Invalid invocation (unknown document id, bad arguments)
    #[error("{0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ReviewDeckError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Registry(_) | Self::Render(_) | Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Site configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration file exists but could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O failure (permissions, invalid UTF-8, not a file)
        #[source]
        source: std::io::Error,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Registry Errors
// ============================================================================

/// Violations of the document registry invariants.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    /// Two records share the same id
    #[error("duplicate document id: {0}")]
    DuplicateId(String),

    /// Id is not kebab-case
    #[error("invalid document id '{0}': expected lowercase letters, digits and '-'")]
    InvalidId(String),

    /// Score is not a finite number in [0, 10]
    #[error("score {score} for document '{id}' is outside [0, 10]")]
    ScoreOutOfRange {
        /// Offending document id
        id: String,
        /// Offending score
        score: f64,
    },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The configured highlight theme is not bundled
    #[error("unknown highlight theme '{name}' (available: {available})")]
    UnknownTheme {
        /// Requested theme name
        name: String,
        /// Comma-separated list of bundled themes
        available: String,
    },

    /// Writing an exported page failed
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

// ============================================================================
// Server Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listening socket
    #[error("bind failed on {addr}: {source}")]
    Bind {
        /// Requested bind address
        addr: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `reviewdeck` operations.
pub type Result<T> = std::result::Result<T, ReviewDeckError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::SERVER_ERROR, 4);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
        assert_eq!(ExitCode::INTERRUPTED, 130);
        assert_eq!(ExitCode::TERMINATED, 143);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: ReviewDeckError = ConfigError::MissingFile {
            path: PathBuf::from("/test"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_config_read_error_keeps_cause() {
        let err: ReviewDeckError = ConfigError::Read {
            path: PathBuf::from("/etc/site.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
        assert_eq!(err.to_string(), "cannot read /etc/site.yaml: denied");
    }

    #[test]
    fn test_server_error_exit_code() {
        let err: ReviewDeckError = ServerError::Bind {
            addr: "127.0.0.1:1".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::SERVER_ERROR);
        assert!(err.to_string().contains("127.0.0.1:1"));
    }

    #[test]
    fn test_usage_error_exit_code() {
        let err = ReviewDeckError::Usage("unknown document 'x'".to_string());
        assert_eq!(err.exit_code(), ExitCode::USAGE_ERROR);
        assert_eq!(err.to_string(), "unknown document 'x'");
    }

    #[test]
    fn test_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: ReviewDeckError = io_err.into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::ScoreOutOfRange {
            id: "security".to_string(),
            score: 11.0,
        };
        assert!(err.to_string().contains("security"));
        assert!(err.to_string().contains("11"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("site.yaml"),
            line: Some(4),
            message: "unexpected token".to_string(),
        };
        assert!(err.to_string().contains("site.yaml"));
        assert!(err.to_string().contains("unexpected token"));
    }
}
