//! Multi-label tally of (expected, predicted) label combinations.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{AssessError, Result};
use crate::loader::{LegacyRecords, SampleLabels};
use crate::reference::ReferenceData;
use crate::species::{combination, is_species_level, split_combination, LabelSet};

/// Tally key: expected and predicted label combinations of one sample.
///
/// Ordered by expected combination, then predicted combination.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TallyKey {
    pub expected: String,
    pub predicted: String,
}

impl TallyKey {
    pub fn new(expected: impl Into<String>, predicted: impl Into<String>) -> Self {
        Self { expected: expected.into(), predicted: predicted.into() }
    }

    /// Key for a pair of label sets.
    pub fn from_labels(expected: &LabelSet, predicted: &LabelSet) -> Self {
        Self { expected: combination(expected), predicted: combination(predicted) }
    }
}

/// Count of samples per (expected, predicted) combination pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    counts: BTreeMap<TallyKey, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` samples to `key`.
    pub fn add(&mut self, key: TallyKey, count: usize) {
        *self.counts.entry(key).or_insert(0) += count;
    }

    /// Number of samples with this key.
    pub fn get(&self, key: &TallyKey) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Total number of samples tallied.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, TallyKey, usize> {
        self.counts.iter()
    }
}

impl<'a> IntoIterator for &'a Tally {
    type Item = (&'a TallyKey, &'a usize);
    type IntoIter = btree_map::Iter<'a, TallyKey, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, P: Into<String>> FromIterator<(K, P, usize)> for Tally {
    fn from_iter<I: IntoIterator<Item = (K, P, usize)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (expected, predicted, count) in iter {
            tally.add(TallyKey::new(expected, predicted), count);
        }
        tally
    }
}

/// Tally the samples classified by both inputs.
///
/// Fails when the inputs share no sample.
pub fn build_tally(known: &SampleLabels, method: &SampleLabels) -> Result<Tally> {
    let mut tally = Tally::new();
    let mut common = 0usize;
    for (sample, predicted) in method {
        let Some(expected) = known.get(sample) else {
            continue;
        };
        tally.add(TallyKey::from_labels(expected, predicted), 1);
        common += 1;
    }

    if common == 0 {
        return Err(AssessError::EmptyIntersection { known: known.len(), method: method.len() });
    }
    if known.len() > common || method.len() > common {
        tracing::info!(
            known_only = known.len() - common,
            method_only = method.len() - common,
            "samples not in both inputs are not assessed"
        );
    }
    if tally.total() != common {
        return Err(AssessError::Consistency {
            check: "tally total vs shared samples".to_string(),
            expected: common,
            actual: tally.total(),
        });
    }
    tracing::info!(samples = common, keys = tally.len(), "built tally");
    Ok(tally)
}

/// Tally legacy per-sequence records of one sample.
///
/// Both streams are sorted by sequence name and then compared position by
/// position, so they must list exactly the same sequences. A wildcard
/// expected file supplies its species for every predicted sequence. This
/// pairs two files; it is not a general unordered multi-file merge.
pub fn tally_sequence_pairs(
    tally: &mut Tally,
    expected: &LegacyRecords,
    predicted: &LegacyRecords,
) -> Result<()> {
    let mut predicted_seqs: Vec<&(String, LabelSet)> = predicted.sequences.iter().collect();
    predicted_seqs.sort_by(|a, b| a.0.cmp(&b.0));

    if let Some(asserted) = &expected.wildcard {
        for (_, labels) in predicted_seqs {
            tally.add(TallyKey::from_labels(asserted, labels), 1);
        }
        return Ok(());
    }

    let mut expected_seqs: Vec<&(String, LabelSet)> = expected.sequences.iter().collect();
    expected_seqs.sort_by(|a, b| a.0.cmp(&b.0));

    if expected_seqs.len() != predicted_seqs.len() {
        return Err(AssessError::SequenceMismatch {
            expected: format!("{} sequences", expected_seqs.len()),
            predicted: format!("{} sequences", predicted_seqs.len()),
        });
    }
    for ((expt_name, expt), (pred_name, pred)) in expected_seqs.into_iter().zip(predicted_seqs) {
        if expt_name != pred_name {
            return Err(AssessError::SequenceMismatch {
                expected: expt_name.clone(),
                predicted: pred_name.clone(),
            });
        }
        tally.add(TallyKey::from_labels(expt, pred), 1);
    }
    Ok(())
}

/// Species to evaluate: the reference universe plus every tallied label.
///
/// A predicted species outside the universe is fatal; an expected one only
/// warns (negative controls and non-target organisms have no references).
pub fn evaluation_species(tally: &Tally, reference: &ReferenceData) -> Result<Vec<String>> {
    let mut species: BTreeSet<String> = reference.species().iter().cloned().collect();
    let mut unlisted_expected = BTreeSet::new();

    for key in tally.iter().map(|(key, _)| key) {
        for label in split_combination(&key.predicted) {
            if !is_species_level(label) {
                return Err(AssessError::NotSpeciesLevel { name: label.to_string() });
            }
            if !reference.contains(label) {
                return Err(AssessError::UnknownPrediction { species: label.to_string() });
            }
        }
        for label in split_combination(&key.expected) {
            if !is_species_level(label) {
                return Err(AssessError::NotSpeciesLevel { name: label.to_string() });
            }
            if !reference.contains(label) && unlisted_expected.insert(label.to_string()) {
                tracing::warn!(species = label, "expected species not in the reference species list");
            }
            species.insert(label.to_string());
        }
    }

    Ok(species.into_iter().collect())
}
