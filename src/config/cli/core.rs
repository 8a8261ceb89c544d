//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::AssessSpec;

/// Assess species classifiers against known sample contents
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "barcode-assess")]
#[command(version)]
#[command(
    about = "Multi-label assessment of DNA barcode species classifiers against known sample contents"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Compare a classifier's predictions with the known species of each sample
    Assess(AssessArgs),

    /// List the species universe of a reference database
    Species(SpeciesArgs),
}

/// Arguments for the assess command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AssessArgs {
    /// Files or directories to search for classifications
    #[arg(short, long, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Tag of the classifier to assess, files named <sample>.<method>.tsv
    #[arg(short, long)]
    pub method: Option<String>,

    /// Tag of the truth files, named <sample>.<known>.tsv [default: known]
    #[arg(long)]
    pub known: Option<String>,

    /// Only consider this marker
    #[arg(long)]
    pub marker: Option<String>,

    /// Skip files whose names start with any of these prefixes
    #[arg(long, num_args = 1..)]
    pub ignore_prefixes: Vec<String>,

    /// Minimum sequence count for a prediction to count [default: 0]
    #[arg(long)]
    pub min_abundance: Option<usize>,

    /// SQLite reference database
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Metrics table output, `-` for stdout [default: -]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the expected vs predicted mapping table here
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Write the multi-class confusion matrix here
    #[arg(long)]
    pub confusion: Option<PathBuf>,

    /// Pair legacy files sequence by sequence
    #[arg(long)]
    pub per_sequence: bool,

    /// YAML file with default values for any of these options
    #[arg(long, value_name = "YAML")]
    pub config: Option<PathBuf>,
}

/// Arguments for the species command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SpeciesArgs {
    /// SQLite reference database
    #[arg(short, long)]
    pub database: PathBuf,

    /// Only species with sequences for this marker
    #[arg(long)]
    pub marker: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to an AssessSpec
pub fn apply_overrides(spec: &mut AssessSpec, args: &AssessArgs) {
    if !args.input.is_empty() {
        spec.inputs = args.input.clone();
    }
    if let Some(method) = &args.method {
        spec.method = method.clone();
    }
    if let Some(known) = &args.known {
        spec.known = known.clone();
    }
    if let Some(marker) = &args.marker {
        spec.marker = Some(marker.clone());
    }
    if !args.ignore_prefixes.is_empty() {
        spec.ignore_prefixes = args.ignore_prefixes.clone();
    }
    if let Some(min_abundance) = args.min_abundance {
        spec.min_abundance = min_abundance;
    }
    if let Some(database) = &args.database {
        spec.database = Some(database.clone());
    }
    if let Some(output) = &args.output {
        spec.output.metrics = output.clone();
    }
    if let Some(table) = &args.table {
        spec.output.table = Some(table.clone());
    }
    if let Some(confusion) = &args.confusion {
        spec.output.confusion = Some(confusion.clone());
    }
    if args.per_sequence {
        spec.per_sequence = true;
    }
}
