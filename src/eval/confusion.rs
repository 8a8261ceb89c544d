//! TP/FP/FN/TN extraction from a multi-label tally.
//!
//! A sample with expected {A, B} and predicted {A, C} is one TP for A, one
//! FP for C, one FN for B, and one TN for every other species. The global
//! extraction therefore sums to |species| × samples, while a single-class
//! binary extraction sums to the number of samples.

use std::fmt;
use std::ops::{Add, AddAssign};

use super::tally::Tally;
use crate::species::combination_contains;

/// Confusion cell counts for one class (or all classes together).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConfusionCounts {
    pub tp: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tn: usize,
}

impl ConfusionCounts {
    pub fn new(tp: usize, fp: usize, fn_: usize, tn: usize) -> Self {
        Self { tp, fp, fn_, tn }
    }

    /// TP + FP + FN + TN.
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.fn_ + self.tn
    }

    /// True when the class was never expected nor predicted.
    pub fn is_pure_negative(&self) -> bool {
        self.tp == 0 && self.fp == 0 && self.fn_ == 0
    }

    /// Add `count` to the cell for one membership outcome.
    pub fn record(&mut self, expected: bool, predicted: bool, count: usize) {
        match (expected, predicted) {
            (true, true) => self.tp += count,
            (false, true) => self.fp += count,
            (true, false) => self.fn_ += count,
            (false, false) => self.tn += count,
        }
    }
}

impl Add for ConfusionCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            tp: self.tp + other.tp,
            fp: self.fp + other.fp,
            fn_: self.fn_ + other.fn_,
            tn: self.tn + other.tn,
        }
    }
}

impl AddAssign for ConfusionCounts {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl fmt::Display for ConfusionCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TP={} FP={} FN={} TN={}", self.tp, self.fp, self.fn_, self.tn)
    }
}

/// Binary counts for one class: is `class` in the expected × predicted
/// combination of each entry, weighted by the entry count.
pub fn extract_binary(class: &str, tally: &Tally) -> ConfusionCounts {
    let mut counts = ConfusionCounts::default();
    for (key, &count) in tally {
        counts.record(
            combination_contains(&key.expected, class),
            combination_contains(&key.predicted, class),
            count,
        );
    }
    counts
}

/// Global multi-label counts over every species in `species`.
pub fn extract_global(tally: &Tally, species: &[String]) -> ConfusionCounts {
    let mut counts = ConfusionCounts::default();
    for (key, &count) in tally {
        counts += entry_counts(&key.expected, &key.predicted, count, species);
    }
    counts
}

/// Counts contributed by one tally entry.
///
/// An entry with nothing expected and nothing predicted is a true negative
/// for every species.
pub(crate) fn entry_counts(expected: &str, predicted: &str, count: usize, species: &[String]) -> ConfusionCounts {
    if expected.is_empty() && predicted.is_empty() {
        return ConfusionCounts::new(0, 0, 0, count * species.len());
    }
    membership_counts(expected, predicted, count, species)
}

/// Per-species membership loop used for every non-empty entry.
pub(crate) fn membership_counts(
    expected: &str,
    predicted: &str,
    count: usize,
    species: &[String],
) -> ConfusionCounts {
    let mut counts = ConfusionCounts::default();
    for class in species {
        counts.record(
            combination_contains(expected, class),
            combination_contains(predicted, class),
            count,
        );
    }
    counts
}
