//! In-memory reference store.

use super::ReferenceStore;
use crate::error::Result;

/// Reference taxonomy held in vectors, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemoryReference {
    /// (marker, canonical species) for every reference sequence.
    sequences: Vec<(String, String)>,
    synonyms: Vec<(String, String)>,
}

impl InMemoryReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference sequence for `species` under `marker`.
    pub fn with_species(mut self, marker: &str, species: &str) -> Self {
        self.sequences.push((marker.to_string(), species.to_string()));
        self
    }

    /// Map `synonym` onto the canonical `species`.
    pub fn with_synonym(mut self, synonym: &str, species: &str) -> Self {
        self.synonyms.push((synonym.to_string(), species.to_string()));
        self
    }
}

impl ReferenceStore for InMemoryReference {
    fn species_names(&self, marker: Option<&str>) -> Result<Vec<String>> {
        Ok(self
            .sequences
            .iter()
            .filter(|(m, _)| marker.map_or(true, |wanted| wanted == m))
            .map(|(_, species)| species.clone())
            .collect())
    }

    fn synonyms(&self) -> Result<Vec<(String, String)>> {
        Ok(self.synonyms.clone())
    }
}
