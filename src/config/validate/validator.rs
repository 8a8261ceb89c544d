//! Assessment specification checks

use super::error::ValidationError;
use crate::config::schema::AssessSpec;

/// Validate a merged assessment specification
///
/// Checks:
/// - At least one input path
/// - Method and known tags present, well-formed and distinct
/// - A reference database
pub fn validate_spec(spec: &AssessSpec) -> Result<(), ValidationError> {
    if spec.inputs.is_empty() {
        return Err(ValidationError::NoInputs);
    }

    if spec.method.is_empty() {
        return Err(ValidationError::MissingMethod);
    }
    if spec.known.is_empty() {
        return Err(ValidationError::EmptyTag("known"));
    }
    check_tag("method", &spec.method)?;
    check_tag("known", &spec.known)?;
    if spec.method == spec.known {
        return Err(ValidationError::IdenticalTags(spec.method.clone()));
    }

    if spec.database.is_none() {
        return Err(ValidationError::MissingDatabase);
    }

    Ok(())
}

fn check_tag(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().any(|c| c == '/' || c == '\\' || c.is_whitespace()) {
        return Err(ValidationError::InvalidTag { field, value: value.to_string() });
    }
    Ok(())
}
