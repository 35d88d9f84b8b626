//! `reviewdeck` - code review dashboard
//!
//! Serves (or exports as a static site) a fixed set of markdown review
//! documents behind a sidebar and an aggregate landing view.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod observability;
pub mod registry;
pub mod render;
pub mod selector;
pub mod server;
