//! Configuration module
//!
//! Handles loading and validation of the site configuration: project
//! header, editorial summary content and highlight theme.

pub mod loader;
pub mod schema;

pub use loader::{ConfigLoader, LoadResult, LoadWarning, LoaderOptions, load_or_default};
pub use schema::*;
