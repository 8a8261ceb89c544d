//! barcode-assess CLI
//!
//! # Usage
//!
//! ```bash
//! # Assess a classifier over every sample under runs/
//! barcode-assess assess -i runs/ -m onebp -d references.sqlite
//!
//! # Also write the mapping table and confusion matrix
//! barcode-assess assess -i runs/ -m onebp -d references.sqlite \
//!     -o onebp.assess.tsv --table onebp.table.tsv --confusion onebp.confusion.tsv
//!
//! # List the species universe for one marker
//! barcode-assess species -d references.sqlite --marker ITS1
//! ```

use barcode_assess::cli::{init_tracing, run_command, Cli, LogLevel};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.quiet, cli.verbose));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
