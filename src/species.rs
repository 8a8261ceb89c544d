//! Species labels and label combinations.
//!
//! A label combination is the canonical text form of a set of species: the
//! labels sorted and joined with `;`, with the empty string for "no species".

use std::collections::BTreeSet;

/// Separator between labels in a combination.
pub const COMBINATION_SEPARATOR: char = ';';

/// Set of canonical species labels attributed to one sample.
pub type LabelSet = BTreeSet<String>;

/// True when `name` is "Genus species" (a space between two non-empty parts).
///
/// ```
/// use barcode_assess::species::is_species_level;
///
/// assert!(is_species_level("Phytophthora infestans"));
/// assert!(!is_species_level("Phytophthora"));
/// ```
pub fn is_species_level(name: &str) -> bool {
    name.trim()
        .split_once(' ')
        .is_some_and(|(genus, epithet)| !genus.is_empty() && !epithet.trim().is_empty())
}

/// Join a label set into its combination string.
pub fn combination(labels: &LabelSet) -> String {
    let mut joined = String::new();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            joined.push(COMBINATION_SEPARATOR);
        }
        joined.push_str(label);
    }
    joined
}

/// Split a combination string back into labels.
///
/// The empty combination has no labels.
pub fn split_combination(combination: &str) -> impl Iterator<Item = &str> {
    combination
        .split(COMBINATION_SEPARATOR)
        .filter(|label| !label.is_empty())
}

/// Exact membership test on a combination (never a substring match).
pub fn combination_contains(combination: &str, species: &str) -> bool {
    split_combination(combination).any(|label| label == species)
}
