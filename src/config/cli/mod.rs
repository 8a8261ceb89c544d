//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! barcode-assess assess -i runs/ -m onebp -d references.sqlite
//! barcode-assess assess --config assess.yaml --confusion confusion.tsv
//! barcode-assess species -d references.sqlite --marker ITS1 --format json
//! ```

mod core;
mod types;


pub use core::{apply_overrides, parse_args, AssessArgs, Cli, Command, SpeciesArgs};
pub use types::OutputFormat;
