//! Command-line interface support
//!
//! Command handlers live here so the binary stays a thin clap front-end.

pub mod commands;
pub mod error;

pub use error::CliError;
