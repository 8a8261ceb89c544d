//! Validation error types

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No input files or directories given (use --input or `inputs:`)")]
    NoInputs,

    #[error("No method tag given (use --method or `method:`)")]
    MissingMethod,

    #[error("No reference database given (use --database or `database:`)")]
    MissingDatabase,

    #[error("Method and known tags are both {0:?}; they must differ")]
    IdenticalTags(String),

    #[error("Empty {0} tag")]
    EmptyTag(&'static str),

    #[error("Invalid {field} tag {value:?}: tags may not contain path separators or whitespace")]
    InvalidTag { field: &'static str, value: String },
}
