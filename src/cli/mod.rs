//! CLI command handlers and utilities.

mod commands;
mod logging;

pub use commands::{format_error, run_command};
pub use logging::{init_tracing, LogLevel};

// Re-export Cli from config for convenience
pub use crate::config::Cli;
