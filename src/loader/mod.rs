//! Loading per-sample species labels from classifier and truth files.
//!
//! Two file shapes are understood:
//! - the tally format, a wide table of per-sample sequence counts with a
//!   `genus-species` annotation column ([`tally_format`]);
//! - the legacy per-sample format, optionally a wildcard control asserting a
//!   single species for every read ([`legacy`]).
//!
//! Each file is tried as a tally first. Only a missing `#Marker` header sends
//! it to the legacy parser; every other tally problem is fatal.

pub mod legacy;
pub mod tally_format;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{AssessError, Result};
use crate::reference::ReferenceData;
use crate::species::{is_species_level, LabelSet, COMBINATION_SEPARATOR};

pub use legacy::{read_legacy_records, LegacyRecords};
pub use tally_format::{parse_tally_file, TallyParse};

/// Mapping from sample name to its canonical species labels.
pub type SampleLabels = BTreeMap<String, LabelSet>;

/// Result of parsing one input file, tagged by the shape it was read as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedFile {
    /// Current tally format, possibly covering many samples.
    Tally(SampleLabels),
    /// Legacy per-sample file.
    Legacy(SampleLabels),
}

impl ParsedFile {
    pub fn into_samples(self) -> SampleLabels {
        match self {
            Self::Tally(samples) | Self::Legacy(samples) => samples,
        }
    }
}

/// Options shared by every file of one load.
#[derive(Clone, Copy, Debug)]
pub struct LoadOptions<'a> {
    pub reference: &'a ReferenceData,
    pub marker: Option<&'a str>,
    pub min_abundance: usize,
}

/// Find input files whose name ends with `suffix`.
///
/// Directories are walked recursively. Names starting with any of
/// `ignore_prefixes` are skipped. The result holds canonical paths, sorted
/// and de-duplicated.
pub fn find_requested_files(
    inputs: &[PathBuf],
    suffix: &str,
    ignore_prefixes: &[String],
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            collect_dir(input, suffix, ignore_prefixes, &mut files)?;
        } else if input.is_file() {
            if wanted(input, suffix, ignore_prefixes) {
                files.push(input.clone());
            }
        } else {
            return Err(AssessError::InputNotFound { path: input.clone() });
        }
    }
    // The same file may be reachable through several spellings
    let mut files = files
        .into_iter()
        .map(|path| {
            std::fs::canonicalize(&path)
                .map_err(|e| AssessError::io(format!("resolving {}", path.display()), e))
        })
        .collect::<Result<Vec<_>>>()?;
    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(AssessError::NoInputFiles { suffix: suffix.to_string() });
    }
    tracing::info!(suffix, files = files.len(), "found input files");
    Ok(files)
}

fn collect_dir(
    dir: &Path,
    suffix: &str,
    ignore_prefixes: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| AssessError::io(format!("listing {}", dir.display()), e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| AssessError::io(format!("listing {}", dir.display()), e))?
            .path();
        if path.is_dir() {
            collect_dir(&path, suffix, ignore_prefixes, files)?;
        } else if wanted(&path, suffix, ignore_prefixes) {
            files.push(path);
        }
    }
    Ok(())
}

fn wanted(path: &Path, suffix: &str, ignore_prefixes: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(suffix) && !ignore_prefixes.iter().any(|p| name.starts_with(p.as_str()))
}

/// Sample name of a per-sample file: its file name minus `suffix`.
pub fn sample_name(path: &Path, suffix: &str) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(suffix).map(str::to_string).unwrap_or(name)
}

/// Parse one file, falling back to the legacy shape on a missing header.
pub fn parse_file(path: &Path, suffix: &str, options: LoadOptions<'_>) -> Result<ParsedFile> {
    match parse_tally_file(path, options)? {
        TallyParse::Parsed(samples) => Ok(ParsedFile::Tally(samples)),
        TallyParse::MissingHeader => {
            let records = read_legacy_records(path, options)?;
            let mut samples = SampleLabels::new();
            samples.insert(sample_name(path, suffix), records.sample_labels());
            Ok(ParsedFile::Legacy(samples))
        }
    }
}

/// Load and merge the sample labels of every file.
pub fn load_sample_labels(
    files: &[PathBuf],
    suffix: &str,
    options: LoadOptions<'_>,
) -> Result<SampleLabels> {
    let mut merged = SampleLabels::new();
    for path in files {
        let parsed = parse_file(path, suffix, options)?;
        tracing::debug!(
            file = %path.display(),
            shape = if matches!(parsed, ParsedFile::Tally(_)) { "tally" } else { "legacy" },
            "parsed input file"
        );
        merge_samples(&mut merged, parsed.into_samples());
    }
    tracing::info!(suffix, samples = merged.len(), "loaded sample labels");
    Ok(merged)
}

/// Union `other` into `into`, sample by sample.
pub fn merge_samples(into: &mut SampleLabels, other: SampleLabels) {
    for (sample, labels) in other {
        into.entry(sample).or_default().extend(labels);
    }
}

/// Canonical species-level labels from a `;`-separated annotation field.
///
/// Synonyms are resolved before the species-level filter, so genus-only
/// names are dropped silently.
pub(crate) fn species_labels<'a>(
    field: &'a str,
    reference: &'a ReferenceData,
) -> impl Iterator<Item = String> + 'a {
    field
        .split(COMBINATION_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(move |name| reference.canonical(name))
        .filter(|name| is_species_level(name))
        .map(str::to_string)
}
