//! Per-class and overall classification metrics.

use super::confusion::{extract_binary, extract_global, ConfusionCounts};
use super::tally::Tally;
use crate::error::{AssessError, Result};

/// Name of the row holding the global multi-label counts.
pub const OVERALL: &str = "OVERALL";

/// Ratios derived from confusion counts.
///
/// Each ratio is 0 when its numerator is zero or its denominator is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClassMetrics {
    pub sensitivity: f64,
    pub specificity: f64,
    pub precision: f64,
    pub f1: f64,
    pub hamming_loss: f64,
    pub ad_hoc_loss: f64,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if numerator == 0 || denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl ClassMetrics {
    pub fn from_counts(c: &ConfusionCounts) -> Self {
        Self {
            sensitivity: ratio(c.tp, c.tp + c.fn_),
            specificity: ratio(c.tn, c.tn + c.fp),
            precision: ratio(c.tp, c.tp + c.fp),
            f1: ratio(2 * c.tp, 2 * c.tp + c.fp + c.fn_),
            hamming_loss: ratio(c.fp + c.fn_, c.total()),
            ad_hoc_loss: ratio(c.fp + c.fn_, c.tp + c.fp + c.fn_),
        }
    }
}

/// One row of the metrics table.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsRow {
    pub name: String,
    pub counts: ConfusionCounts,
    pub metrics: ClassMetrics,
}

impl MetricsRow {
    pub fn new(name: impl Into<String>, counts: ConfusionCounts) -> Self {
        Self { name: name.into(), metrics: ClassMetrics::from_counts(&counts), counts }
    }
}

/// Name of the row folding species that were never expected nor predicted.
pub fn other_row_name(folded: usize) -> String {
    format!("OTHER {folded} SPECIES IN DB")
}

/// Build the metrics table: `OVERALL`, then visible species, then `OTHER`.
///
/// Species with TP = FP = FN = 0 are folded into the final row. Fails when
/// the overall total is not |species| × samples, or when the per-species
/// totals do not add up to the overall total.
pub fn metrics_table(tally: &Tally, species: &[String]) -> Result<Vec<MetricsRow>> {
    let overall = extract_global(tally, species);
    let expected_total = species.len() * tally.total();
    if overall.total() != expected_total {
        return Err(AssessError::Consistency {
            check: "overall TP+FP+FN+TN vs species × samples".to_string(),
            expected: expected_total,
            actual: overall.total(),
        });
    }

    let mut rows = vec![MetricsRow::new(OVERALL, overall)];
    let mut per_class_total = 0usize;
    let mut folded = 0usize;
    let mut folded_tn = 0usize;

    for class in species {
        let counts = extract_binary(class, tally);
        per_class_total += counts.total();
        if counts.is_pure_negative() {
            folded += 1;
            folded_tn += counts.tn;
        } else {
            rows.push(MetricsRow::new(class.as_str(), counts));
        }
    }

    if per_class_total != overall.total() {
        return Err(AssessError::Consistency {
            check: "sum of per-species totals vs overall total".to_string(),
            expected: overall.total(),
            actual: per_class_total,
        });
    }

    rows.push(MetricsRow::new(other_row_name(folded), ConfusionCounts::new(0, 0, 0, folded_tn)));
    Ok(rows)
}
