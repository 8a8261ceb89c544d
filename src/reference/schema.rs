//! SQLite schema for the reference taxonomy database.

use rusqlite::Connection;

/// Create the reference tables if they don't exist.
pub fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS taxonomy (
    id INTEGER PRIMARY KEY,
    ncbi_taxid INTEGER,
    genus TEXT NOT NULL,
    species TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS idx_taxonomy_name ON taxonomy(genus, species);

CREATE TABLE IF NOT EXISTS synonym (
    id INTEGER PRIMARY KEY,
    taxonomy_id INTEGER NOT NULL,
    name TEXT NOT NULL UNIQUE,
    FOREIGN KEY (taxonomy_id) REFERENCES taxonomy(id)
);

CREATE TABLE IF NOT EXISTS marker_definition (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS sequence_source (
    id INTEGER PRIMARY KEY,
    marker_definition_id INTEGER NOT NULL,
    taxonomy_id INTEGER NOT NULL,
    source_accession TEXT NOT NULL,
    FOREIGN KEY (marker_definition_id) REFERENCES marker_definition(id),
    FOREIGN KEY (taxonomy_id) REFERENCES taxonomy(id)
);
CREATE INDEX IF NOT EXISTS idx_sequence_source_taxonomy ON sequence_source(taxonomy_id);
";
