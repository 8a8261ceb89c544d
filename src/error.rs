//! Error types with actionable diagnostics.
//!
//! Every fatal condition of an assessment run maps to one [`AssessError`]
//! variant. Messages name the offending file, line or species so the user
//! can fix the input without reading the source.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ValidationError;

/// Result type alias for assessment operations.
pub type Result<T> = std::result::Result<T, AssessError>;

/// Errors that terminate an assessment run.
#[derive(Error, Debug)]
pub enum AssessError {
    /// An input path given on the command line does not exist.
    #[error("Input path not found: {path}\n  → Check the --input arguments")]
    InputNotFound { path: PathBuf },

    /// No files matched the requested suffix.
    #[error("No input files found ending {suffix}\n  → Check the --method/--known tags and --ignore-prefixes")]
    NoInputFiles { suffix: String },

    /// Structural TSV problem (field count, non-integer count, bad header).
    #[error("Malformed TSV in {path} line {line}: {message}")]
    MalformedTsv { path: PathBuf, line: usize, message: String },

    /// Legacy sequence name is not `<identifier>_<abundance>`.
    #[error("Malformed record in {path} line {line}: sequence name {name:?} is not <identifier>_<abundance>")]
    MalformedRecord { path: PathBuf, line: usize, name: String },

    /// Wildcard control asserts something that is not a genus and species.
    #[error("Malformed species label {label:?} in {path}\n  → Wildcard controls must name a species, e.g. \"Genus species\"")]
    MalformedLabel { path: PathBuf, label: String },

    /// Tally file has no genus-species annotation column.
    #[error("Missing genus-species annotation for the sequences in {path}\n  → Was this a sample tally rather than classifier output?")]
    MissingAnnotation { path: PathBuf },

    /// Requested marker never appears in a file that has records.
    #[error("Marker {marker:?} not found in {path}\n  → Check --marker against the file's #Marker column")]
    MarkerNotFound { path: PathBuf, marker: String },

    /// Per-sequence pairing found different sequences in the two inputs.
    #[error("Sequence mismatch: {expected} vs {predicted}\n  → Known and method files must list the same sequences")]
    SequenceMismatch { expected: String, predicted: String },

    /// Reference database failure.
    #[error("Reference database error: {context}\n  Cause: {source}")]
    Database {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The reference store lists no species.
    #[error("No species with reference sequences in the database{}", marker_suffix(.marker))]
    EmptyUniverse { marker: Option<String> },

    /// A name that must be species-level is only a genus.
    #[error("Expected a species-level name, got {name:?}")]
    NotSpeciesLevel { name: String },

    /// The classifier predicted a species the reference cannot produce.
    #[error("Prediction {species:?} is not in the reference species list\n  → Was the classifier run against a different database or marker?")]
    UnknownPrediction { species: String },

    /// Known and method inputs share no sample.
    #[error("No samples in common between known ({known} samples) and method ({method} samples) inputs")]
    EmptyIntersection { known: usize, method: usize },

    /// Two independently computed totals disagree.
    #[error("Internal consistency check failed for {check}: expected {expected}, got {actual}")]
    Consistency { check: String, expected: usize, actual: usize },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

fn marker_suffix(marker: &Option<String>) -> String {
    match marker {
        Some(m) => format!(" for marker {m:?}"),
        None => String::new(),
    }
}

impl AssessError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a database error with context.
    pub fn database(context: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database { context: context.into(), source }
    }

    /// Check if this error is caused by the user's inputs rather than a defect.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Consistency { .. } | Self::Io { .. } | Self::Database { .. })
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "E001",
            Self::NoInputFiles { .. } => "E002",
            Self::MalformedTsv { .. } => "E010",
            Self::MalformedRecord { .. } => "E011",
            Self::MalformedLabel { .. } => "E012",
            Self::MissingAnnotation { .. } => "E013",
            Self::MarkerNotFound { .. } => "E014",
            Self::SequenceMismatch { .. } => "E015",
            Self::Database { .. } => "E020",
            Self::EmptyUniverse { .. } => "E021",
            Self::NotSpeciesLevel { .. } => "E022",
            Self::UnknownPrediction { .. } => "E030",
            Self::EmptyIntersection { .. } => "E031",
            Self::Consistency { .. } => "E040",
            Self::Config(_) => "E050",
            Self::ConfigParsing { .. } => "E051",
            Self::Io { .. } => "E060",
        }
    }
}
