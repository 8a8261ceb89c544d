//! # barcode-assess
//!
//! Multi-label assessment of DNA barcode species classifiers.
//!
//! Samples from mixed-species metabarcoding runs may legitimately contain
//! several species, so every sample carries a *set* of expected and a set of
//! predicted species. This crate tallies those sets, derives multi-label
//! confusion counts, and reports per-species and overall metrics.
//!
//! ## Architecture
//!
//! - `reference`: species universe and synonyms from the reference database
//! - `loader`: classifier and truth files into per-sample label sets
//! - `eval`: tally, confusion extraction, metrics and report rendering
//! - `assess`: the end-to-end run
//! - `config`, `cli`: YAML configuration, argument parsing, commands

pub mod assess;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod loader;
pub mod reference;
pub mod species;

pub use assess::{run_assessment, AssessmentReport};
pub use error::{AssessError, Result};
