//! Assessment configuration
//!
//! An [`AssessSpec`] comes from an optional YAML file, is overridden by
//! command-line arguments, and is validated before any input is read:
//!
//! ```yaml
//! inputs: [runs/2024-05]
//! method: onebp
//! known: known
//! marker: ITS1
//! min_abundance: 100
//! database: references.sqlite
//! output:
//!   metrics: onebp.assess.tsv
//!   confusion: onebp.confusion.tsv
//! ```

pub mod cli;
mod load;
mod schema;
mod validate;


pub use cli::{
    apply_overrides, parse_args, AssessArgs, Cli, Command, OutputFormat, SpeciesArgs,
};
pub use load::load_config;
pub use schema::{AssessSpec, OutputSpec};
pub use validate::{validate_spec, ValidationError};
