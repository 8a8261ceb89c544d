//! SQLite-backed reference store.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::ReferenceStore;
use crate::error::{AssessError, Result};

/// Reference taxonomy read from an SQLite database.
#[derive(Debug)]
pub struct SqliteReferenceStore {
    conn: Connection,
}

impl SqliteReferenceStore {
    /// Open an existing database read-only.
    ///
    /// A missing file is an error; the database is never created implicitly.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| AssessError::database(format!("opening {}", path.display()), e))?;
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl ReferenceStore for SqliteReferenceStore {
    fn species_names(&self, marker: Option<&str>) -> Result<Vec<String>> {
        let sql = "SELECT DISTINCT t.genus || ' ' || t.species
             FROM taxonomy t
             JOIN sequence_source s ON s.taxonomy_id = t.id
             JOIN marker_definition m ON m.id = s.marker_definition_id
             WHERE t.species != '' AND (?1 IS NULL OR m.name = ?1)";

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| AssessError::database("preparing species query", e))?;
        let rows = stmt
            .query_map([marker], |row| row.get::<_, String>(0))
            .map_err(|e| AssessError::database("querying species", e))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(|e| AssessError::database("reading species row", e))?);
        }
        Ok(names)
    }

    fn synonyms(&self) -> Result<Vec<(String, String)>> {
        let sql = "SELECT s.name, t.genus || ' ' || t.species
             FROM synonym s
             JOIN taxonomy t ON t.id = s.taxonomy_id
             WHERE t.species != ''";

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| AssessError::database("preparing synonym query", e))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(|e| AssessError::database("querying synonyms", e))?;

        let mut pairs = Vec::new();
        for row in rows {
            pairs.push(row.map_err(|e| AssessError::database("reading synonym row", e))?);
        }
        Ok(pairs)
    }
}
