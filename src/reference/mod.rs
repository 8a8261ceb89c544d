//! Reference taxonomy: the species universe and synonym resolution.
//!
//! A [`ReferenceStore`] is read once into an immutable [`ReferenceData`]
//! snapshot, which is then passed by reference to the loader and the report
//! writer.
//!
//! ## Example
//!
//! ```
//! use barcode_assess::reference::{resolve_reference, InMemoryReference};
//!
//! let store = InMemoryReference::new()
//!     .with_species("ITS1", "Phytophthora infestans")
//!     .with_synonym("Phytophthora infestans var. x", "Phytophthora infestans");
//! let reference = resolve_reference(&store, None)?;
//!
//! assert_eq!(reference.species(), ["Phytophthora infestans"]);
//! assert_eq!(reference.canonical("Phytophthora infestans var. x"), "Phytophthora infestans");
//! # Ok::<(), barcode_assess::AssessError>(())
//! ```

mod memory;
mod schema;
mod sqlite;


pub use memory::InMemoryReference;
pub use schema::init_schema;
pub use sqlite::SqliteReferenceStore;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{AssessError, Result};
use crate::species::is_species_level;

/// Read-only source of reference taxonomy.
pub trait ReferenceStore {
    /// Canonical names of species with at least one reference sequence,
    /// optionally restricted to one marker. Order and duplicates do not matter.
    fn species_names(&self, marker: Option<&str>) -> Result<Vec<String>>;

    /// Pairs of (synonym, canonical species name).
    fn synonyms(&self) -> Result<Vec<(String, String)>>;
}

/// Immutable snapshot of the species universe and synonym map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceData {
    species: Vec<String>,
    synonyms: BTreeMap<String, String>,
}

impl ReferenceData {
    /// Sorted, distinct canonical species names.
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Synonym to canonical name map.
    pub fn synonyms(&self) -> &BTreeMap<String, String> {
        &self.synonyms
    }

    /// Is this canonical species in the universe?
    pub fn contains(&self, species: &str) -> bool {
        self.species.binary_search_by(|s| s.as_str().cmp(species)).is_ok()
    }

    /// Resolve a name through the synonym map; unknown names are returned as-is.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.synonyms.get(name).map_or(name, String::as_str)
    }
}

/// Build the reference snapshot from a store.
///
/// Fails when the store lists no species, or lists a name that is not
/// species-level.
pub fn resolve_reference(store: &dyn ReferenceStore, marker: Option<&str>) -> Result<ReferenceData> {
    let species: BTreeSet<String> = store.species_names(marker)?.into_iter().collect();
    if species.is_empty() {
        return Err(AssessError::EmptyUniverse { marker: marker.map(str::to_string) });
    }
    if let Some(bad) = species.iter().find(|name| !is_species_level(name)) {
        return Err(AssessError::NotSpeciesLevel { name: bad.clone() });
    }

    let synonyms: BTreeMap<String, String> = store.synonyms()?.into_iter().collect();
    tracing::info!(
        species = species.len(),
        synonyms = synonyms.len(),
        marker = marker.unwrap_or("*"),
        "loaded reference species list"
    );

    Ok(ReferenceData { species: species.into_iter().collect(), synonyms })
}
