//! Observability module
//!
//! Logging infrastructure for `reviewdeck`.

pub mod logging;

pub use logging::{LogFormat, LoggingOptions, init_logging, verbosity_to_directive};
