//! End-to-end assessment run.
//!
//! [`run_assessment`] renders every report in memory. Nothing is written
//! here, so a fatal error anywhere leaves no partial output behind.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::AssessSpec;
use crate::error::{AssessError, Result};
use crate::eval::{
    build_tally, evaluation_species, metrics_table, render_confusion_matrix, render_mapping,
    render_metrics, tally_sequence_pairs, Tally,
};
use crate::loader::{
    find_requested_files, load_sample_labels, read_legacy_records, sample_name, LoadOptions,
};
use crate::reference::ReferenceData;

/// The three rendered reports of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssessmentReport {
    /// Expected vs predicted combinations with sample counts
    pub mapping: String,
    /// Multi-class confusion matrix
    pub confusion: String,
    /// Per-species and overall metrics
    pub metrics: String,
    /// Number of species evaluated
    pub species_count: usize,
    /// Number of samples (or sequences, per-sequence mode) tallied
    pub samples: usize,
}

/// Assess `spec.method` against `spec.known` over the reference universe.
pub fn run_assessment(spec: &AssessSpec, reference: &ReferenceData) -> Result<AssessmentReport> {
    let options = LoadOptions {
        reference,
        marker: spec.marker.as_deref(),
        min_abundance: spec.min_abundance,
    };
    let method_suffix = spec.method_suffix();
    let known_suffix = spec.known_suffix();

    let method_files = find_requested_files(&spec.inputs, &method_suffix, &spec.ignore_prefixes)?;
    let known_files = find_requested_files(&spec.inputs, &known_suffix, &spec.ignore_prefixes)?;

    let tally = if spec.per_sequence {
        tally_per_sequence(&method_files, &method_suffix, &known_files, &known_suffix, options)?
    } else {
        let method = load_sample_labels(&method_files, &method_suffix, options)?;
        let known = load_sample_labels(&known_files, &known_suffix, options)?;
        build_tally(&known, &method)?
    };

    let species = evaluation_species(&tally, reference)?;
    let mapping = render_mapping(&tally);
    let confusion = render_confusion_matrix(&tally, &species)?;
    let metrics = render_metrics(&metrics_table(&tally, &species)?);

    tracing::info!(
        method = %spec.method,
        known = %spec.known,
        species = species.len(),
        samples = tally.total(),
        "assessment complete"
    );
    Ok(AssessmentReport {
        mapping,
        confusion,
        metrics,
        species_count: species.len(),
        samples: tally.total(),
    })
}

/// Known file sitting next to `method_file` with the same stem.
fn partner(method_file: &Path, method_suffix: &str, known_suffix: &str) -> PathBuf {
    let stem = sample_name(method_file, method_suffix);
    method_file.with_file_name(format!("{stem}{known_suffix}"))
}

fn tally_per_sequence(
    method_files: &[PathBuf],
    method_suffix: &str,
    known_files: &[PathBuf],
    known_suffix: &str,
    options: LoadOptions<'_>,
) -> Result<Tally> {
    let known: BTreeSet<&PathBuf> = known_files.iter().collect();
    let mut tally = Tally::new();
    let mut pairs = 0usize;

    for method_file in method_files {
        let known_file = partner(method_file, method_suffix, known_suffix);
        if !known.contains(&known_file) {
            tracing::warn!(file = %method_file.display(), "no known file to pair with, skipping");
            continue;
        }
        let expected = read_legacy_records(&known_file, options)?;
        let predicted = read_legacy_records(method_file, options)?;
        tally_sequence_pairs(&mut tally, &expected, &predicted)?;
        pairs += 1;
    }

    if pairs == 0 {
        return Err(AssessError::EmptyIntersection {
            known: known_files.len(),
            method: method_files.len(),
        });
    }
    tracing::info!(files = pairs, sequences = tally.total(), "tallied per-sequence pairs");
    Ok(tally)
}
