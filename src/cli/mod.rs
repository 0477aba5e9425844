//! CLI layer for paper-digest.
//!
//! Provides the command-line interface using clap, with commands for running
//! the web app and for extracting or summarizing a single document.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, Settings};
