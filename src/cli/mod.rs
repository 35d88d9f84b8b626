//! Command-line interface.
//!
//! Argument definitions live in [`args`]; handlers live in [`commands`].

pub mod args;
pub mod commands;
pub mod signals;
