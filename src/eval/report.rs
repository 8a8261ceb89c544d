//! Tab-separated report rendering and writing.
//!
//! Reports are rendered to strings first so that every consistency check
//! has passed before anything is written.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use super::metrics::MetricsRow;
use super::tally::Tally;
use crate::error::{AssessError, Result};
use crate::species::{combination_contains, split_combination, COMBINATION_SEPARATOR};

/// Path meaning "write to standard output".
pub const STDOUT_SENTINEL: &str = "-";

/// Row label for samples with no expected species.
pub const NONE_ROW: &str = "(None)";

/// Mapping table: one row per tally key with its sample count.
pub fn render_mapping(tally: &Tally) -> String {
    let mut out = String::from("#sample-count\tExpected\tPredicted\n");
    for (key, count) in tally {
        out.push_str(&format!("{count}\t{}\t{}\n", key.expected, key.predicted));
    }
    out
}

/// Expected combinations ordered: empty first, then single-species, then
/// multi-species, each group sorted.
fn confusion_rows(tally: &Tally) -> Vec<&str> {
    let expected: BTreeSet<&str> = tally.iter().map(|(key, _)| key.expected.as_str()).collect();
    let (multi, single): (Vec<&str>, Vec<&str>) = expected
        .iter()
        .copied()
        .filter(|e| !e.is_empty())
        .partition(|e| e.contains(COMBINATION_SEPARATOR));

    let mut rows = Vec::with_capacity(expected.len());
    if expected.contains("") {
        rows.push("");
    }
    rows.extend(single);
    rows.extend(multi);
    rows
}

/// Multi-class confusion matrix.
///
/// Columns are `(TN)`, `(FN)` and every predicted species. Per sample and
/// species: a predicted species counts in its own column (TP and FP
/// together), an expected but unpredicted one counts as FN, anything else as
/// TN. The grand total must equal |species| × samples.
pub fn render_confusion_matrix(tally: &Tally, species: &[String]) -> Result<String> {
    let columns: Vec<&str> = tally
        .iter()
        .flat_map(|(key, _)| split_combination(&key.predicted))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let column_index: BTreeMap<&str, usize> =
        columns.iter().enumerate().map(|(i, c)| (*c, i)).collect();

    let mut header = vec!["#Expected vs predicted", "sample count", "(TN)", "(FN)"];
    header.extend(columns.iter().copied());
    let mut out = header.join("\t");
    out.push('\n');

    let mut grand_total = 0usize;
    for row in confusion_rows(tally) {
        let mut samples = 0usize;
        let mut tn = 0usize;
        let mut fn_ = 0usize;
        let mut cells = vec![0usize; columns.len()];

        for (key, &count) in tally.iter().filter(|(key, _)| key.expected == row) {
            samples += count;
            for class in species {
                if let Some(&col) = column_index.get(class.as_str()) {
                    if combination_contains(&key.predicted, class) {
                        cells[col] += count;
                        continue;
                    }
                }
                if combination_contains(&key.expected, class) {
                    fn_ += count;
                } else {
                    tn += count;
                }
            }
        }

        grand_total += tn + fn_ + cells.iter().sum::<usize>();
        let label = if row.is_empty() { NONE_ROW } else { row };
        let mut fields = vec![label.to_string(), samples.to_string(), tn.to_string(), fn_.to_string()];
        fields.extend(cells.iter().map(usize::to_string));
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }

    let expected_total = species.len() * tally.total();
    if grand_total != expected_total {
        return Err(AssessError::Consistency {
            check: "confusion matrix total vs species × samples".to_string(),
            expected: expected_total,
            actual: grand_total,
        });
    }
    Ok(out)
}

/// Metrics table with fixed-precision ratios.
pub fn render_metrics(rows: &[MetricsRow]) -> String {
    let mut out = String::from(
        "#Species\tTP\tFP\tFN\tTN\tsensitivity\tspecificity\tprecision\tF1\tHamming-loss\tAd-hoc-loss\n",
    );
    for row in rows {
        let (c, m) = (&row.counts, &row.metrics);
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.4}\t{:.3}\n",
            row.name,
            c.tp,
            c.fp,
            c.fn_,
            c.tn,
            m.sensitivity,
            m.specificity,
            m.precision,
            m.f1,
            m.hamming_loss,
            m.ad_hoc_loss
        ));
    }
    out
}

/// Write rendered reports as `(path, content)` pairs; `-` is stdout.
///
/// File reports are first written to temporary files beside their
/// destinations and only renamed into place once every one has been
/// written, so a failure leaves no report behind. Stdout reports go last.
pub fn write_reports(reports: &[(&Path, &str)]) -> Result<()> {
    let mut staged = Vec::new();
    let mut to_stdout = Vec::new();

    for &(path, content) in reports {
        if path.as_os_str() == STDOUT_SENTINEL {
            to_stdout.push(content);
            continue;
        }
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file = NamedTempFile::new_in(dir)
            .and_then(|mut file| {
                file.write_all(content.as_bytes())?;
                file.flush()?;
                Ok(file)
            })
            .map_err(|e| AssessError::io(format!("writing {}", path.display()), e))?;
        staged.push((file, path));
    }

    for (file, path) in staged {
        file.persist(path)
            .map_err(|e| AssessError::io(format!("writing {}", path.display()), e.error))?;
    }

    if !to_stdout.is_empty() {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for content in to_stdout {
            handle
                .write_all(content.as_bytes())
                .map_err(|e| AssessError::io("writing report to stdout", e))?;
        }
        handle.flush().map_err(|e| AssessError::io("writing report to stdout", e))?;
    }
    Ok(())
}
