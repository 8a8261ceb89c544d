//! Species command implementation

use serde::Serialize;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{OutputFormat, SpeciesArgs};
use crate::reference::{resolve_reference, ReferenceData, SqliteReferenceStore};

use super::format_error;

#[derive(Serialize)]
struct SpeciesListing<'a> {
    marker: Option<&'a str>,
    species: &'a [String],
    synonyms: usize,
}

pub fn run_species(args: SpeciesArgs, level: LogLevel) -> Result<(), String> {
    let store = SqliteReferenceStore::open(&args.database).map_err(|e| format_error(&e))?;
    let reference =
        resolve_reference(&store, args.marker.as_deref()).map_err(|e| format_error(&e))?;

    log(
        level,
        LogLevel::Verbose,
        &format!("Reference database: {}", args.database.display()),
    );
    print!("{}", render_species(&reference, args.marker.as_deref(), args.format)?);
    Ok(())
}

/// Species listing in the requested format.
pub(crate) fn render_species(
    reference: &ReferenceData,
    marker: Option<&str>,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Text => {
            let mut out = format!(
                "#{} species, {} synonyms\n",
                reference.species().len(),
                reference.synonyms().len()
            );
            for name in reference.species() {
                out.push_str(name);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let listing = SpeciesListing {
                marker,
                species: reference.species(),
                synonyms: reference.synonyms().len(),
            };
            let json = serde_json::to_string_pretty(&listing)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            Ok(format!("{json}\n"))
        }
    }
}
