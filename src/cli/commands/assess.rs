//! Assess command implementation

use std::path::Path;

use crate::assess::{run_assessment, AssessmentReport};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{
    apply_overrides, load_config, validate_spec, AssessArgs, AssessSpec, ValidationError,
};
use crate::error::Result;
use crate::eval::write_reports;
use crate::reference::{resolve_reference, SqliteReferenceStore};

use super::format_error;

pub fn run_assess(args: AssessArgs, level: LogLevel) -> std::result::Result<(), String> {
    let spec = build_spec(&args).map_err(|e| format_error(&e))?;
    let report = assess(&spec).map_err(|e| format_error(&e))?;
    write_outputs(&spec, &report).map_err(|e| format_error(&e))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "✓ Assessed {} against {}: {} samples, {} species",
            spec.method, spec.known, report.samples, report.species_count
        ),
    );
    Ok(())
}

/// Config file values, overridden by the command line, validated.
pub(crate) fn build_spec(args: &AssessArgs) -> Result<AssessSpec> {
    let mut spec = match &args.config {
        Some(path) => load_config(path)?,
        None => AssessSpec::default(),
    };
    apply_overrides(&mut spec, args);
    validate_spec(&spec)?;
    Ok(spec)
}

fn assess(spec: &AssessSpec) -> Result<AssessmentReport> {
    let database = spec.database.as_deref().ok_or(ValidationError::MissingDatabase)?;
    let store = SqliteReferenceStore::open(database)?;
    let reference = resolve_reference(&store, spec.marker.as_deref())?;
    run_assessment(spec, &reference)
}

/// Write every requested report; only called once all have been rendered.
fn write_outputs(spec: &AssessSpec, report: &AssessmentReport) -> Result<()> {
    let mut outputs: Vec<(&Path, &str)> = Vec::with_capacity(3);
    if let Some(table) = &spec.output.table {
        outputs.push((table.as_path(), report.mapping.as_str()));
    }
    if let Some(confusion) = &spec.output.confusion {
        outputs.push((confusion.as_path(), report.confusion.as_str()));
    }
    outputs.push((spec.output.metrics.as_path(), report.metrics.as_str()));
    write_reports(&outputs)
}
