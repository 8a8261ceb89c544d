//! Tally format: per-sample sequence counts with species annotation.
//!
//! ```text
//! #Sequencing sample<TAB>...            (free metadata, ignored)
//! #Marker<TAB>MD5<TAB>abundance<TAB>S1<TAB>S2<TAB>genus-species
//! ITS1<TAB>0a1b..<TAB>120<TAB>100<TAB>20<TAB>Phytophthora infestans
//! ```
//!
//! Sample columns sit between `abundance` and `genus-species`. Every sample
//! column is registered even if none of its counts survive the threshold.

use std::collections::BTreeSet;
use std::path::Path;

use super::{species_labels, LoadOptions, SampleLabels};
use crate::error::{AssessError, Result};

const HEADER_PREFIX: &str = "#Marker\t";
const ANNOTATION_COLUMN: &str = "genus-species";
const FIRST_SAMPLE_COLUMN: usize = 3;

/// Outcome of trying to read a file as a tally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TallyParse {
    /// The file was a tally; labels per sample.
    Parsed(SampleLabels),
    /// A data line came before any `#Marker` header (or there was no data
    /// at all): not a tally, try the legacy shape.
    MissingHeader,
}

struct Header {
    fields: usize,
    samples: Vec<String>,
    annotation: usize,
}

fn parse_header(path: &Path, line_no: usize, line: &str) -> Result<Header> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < FIRST_SAMPLE_COLUMN || fields[1] != "MD5" || fields[2] != "abundance" {
        return Err(AssessError::MalformedTsv {
            path: path.to_path_buf(),
            line: line_no,
            message: "header must start #Marker, MD5, abundance".to_string(),
        });
    }
    let annotation = fields
        .iter()
        .position(|f| *f == ANNOTATION_COLUMN)
        .ok_or_else(|| AssessError::MissingAnnotation { path: path.to_path_buf() })?;
    if annotation < FIRST_SAMPLE_COLUMN {
        return Err(AssessError::MalformedTsv {
            path: path.to_path_buf(),
            line: line_no,
            message: format!("{ANNOTATION_COLUMN} column must follow the sample columns"),
        });
    }

    Ok(Header {
        fields: fields.len(),
        samples: fields[FIRST_SAMPLE_COLUMN..annotation].iter().map(|s| s.to_string()).collect(),
        annotation,
    })
}

/// Read a tally-format file.
///
/// Returns [`TallyParse::MissingHeader`] when the file is not a tally; any
/// other problem (bad header, wrong field count, non-integer count, marker
/// absent from the file) is an error.
pub fn parse_tally_file(path: &Path, options: LoadOptions<'_>) -> Result<TallyParse> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AssessError::io(format!("reading {}", path.display()), e))?;

    let mut header: Option<Header> = None;
    let mut samples = SampleLabels::new();
    let mut markers = BTreeSet::new();
    let mut data_rows = 0usize;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if line.starts_with(HEADER_PREFIX) {
                let parsed = parse_header(path, line_no, line)?;
                for sample in &parsed.samples {
                    samples.entry(sample.clone()).or_default();
                }
                header = Some(parsed);
            }
            continue;
        }

        let Some(header) = header.as_ref() else {
            return Ok(TallyParse::MissingHeader);
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != header.fields {
            return Err(AssessError::MalformedTsv {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("expected {} fields, got {}", header.fields, fields.len()),
            });
        }
        data_rows += 1;

        let marker = fields[0];
        markers.insert(marker.to_string());
        if options.marker.is_some_and(|wanted| wanted != marker) {
            continue;
        }

        let labels: Vec<String> = species_labels(fields[header.annotation], options.reference).collect();
        for (offset, sample) in header.samples.iter().enumerate() {
            let cell = fields[FIRST_SAMPLE_COLUMN + offset];
            let count: usize = cell.trim().parse().map_err(|_| AssessError::MalformedTsv {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("count {cell:?} for sample {sample} is not an integer"),
            })?;
            if count > 0 && count >= options.min_abundance {
                samples.entry(sample.clone()).or_default().extend(labels.iter().cloned());
            }
        }
    }

    if header.is_none() {
        return Ok(TallyParse::MissingHeader);
    }
    if let Some(wanted) = options.marker {
        if data_rows > 0 && !markers.contains(wanted) {
            return Err(AssessError::MarkerNotFound {
                path: path.to_path_buf(),
                marker: wanted.to_string(),
            });
        }
    }

    Ok(TallyParse::Parsed(samples))
}
