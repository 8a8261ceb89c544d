//! CLI command implementations

mod assess;
mod species;

#[cfg(test)]
mod tests;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};
use crate::error::AssessError;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Assess(args) => assess::run_assess(args, log_level),
        Command::Species(args) => species::run_species(args, log_level),
    }
}

/// `[<code>] <message>`, as printed after `Error: `.
pub fn format_error(err: &AssessError) -> String {
    format!("[{}] {err}", err.code())
}
