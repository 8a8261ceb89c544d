//! Legacy per-sample format and wildcard controls.
//!
//! One file per sample, one line per sequence:
//!
//! ```text
//! #sequence-name<TAB>taxid<TAB>genus-species<TAB>note
//! 0a1b2c_120<TAB>4787<TAB>Phytophthora infestans<TAB>
//! ```
//!
//! A line whose name is `*` is a wildcard control: every read in the sample
//! is asserted to be the given species.

use std::path::Path;

use super::{species_labels, LoadOptions};
use crate::error::{AssessError, Result};
use crate::species::{is_species_level, LabelSet, COMBINATION_SEPARATOR};

/// Sequence name marking a wildcard control line.
pub const WILDCARD: &str = "*";

/// Records of one legacy file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyRecords {
    /// Species asserted by wildcard lines, if any.
    pub wildcard: Option<LabelSet>,
    /// (sequence name, labels) in file order, after the abundance filter.
    pub sequences: Vec<(String, LabelSet)>,
}

impl LegacyRecords {
    /// Union of all labels in the file: the sample's label set.
    pub fn sample_labels(&self) -> LabelSet {
        let mut labels = self.wildcard.clone().unwrap_or_default();
        for (_, seq_labels) in &self.sequences {
            labels.extend(seq_labels.iter().cloned());
        }
        labels
    }
}

fn abundance(path: &Path, line_no: usize, name: &str) -> Result<usize> {
    name.rsplit_once('_')
        .and_then(|(_, count)| count.parse().ok())
        .ok_or_else(|| AssessError::MalformedRecord {
            path: path.to_path_buf(),
            line: line_no,
            name: name.to_string(),
        })
}

/// Read a legacy per-sample file.
///
/// Sequence names need the `<identifier>_<abundance>` form only when
/// `min_abundance > 1`. Wildcard labels ignore the threshold.
pub fn read_legacy_records(path: &Path, options: LoadOptions<'_>) -> Result<LegacyRecords> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AssessError::io(format!("reading {}", path.display()), e))?;

    let mut records = LegacyRecords::default();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if !(3..=4).contains(&fields.len()) {
            return Err(AssessError::MalformedTsv {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("expected 3 or 4 fields, got {}", fields.len()),
            });
        }
        let (name, annotation) = (fields[0], fields[2]);

        if name == WILDCARD {
            let asserted = annotation.trim();
            let all_species = !asserted.is_empty()
                && asserted
                    .split(COMBINATION_SEPARATOR)
                    .map(|n| options.reference.canonical(n.trim()))
                    .all(is_species_level);
            if !all_species {
                return Err(AssessError::MalformedLabel {
                    path: path.to_path_buf(),
                    label: asserted.to_string(),
                });
            }
            records
                .wildcard
                .get_or_insert_with(LabelSet::new)
                .extend(species_labels(annotation, options.reference));
            continue;
        }

        if options.min_abundance > 1 && abundance(path, line_no, name)? < options.min_abundance {
            continue;
        }
        let labels: LabelSet = species_labels(annotation, options.reference).collect();
        records.sequences.push((name.to_string(), labels));
    }

    Ok(records)
}
