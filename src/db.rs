use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use crate::error::CitedexError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS venues (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    kind TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS papers (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    title    TEXT NOT NULL,
    year     INTEGER,
    doi      TEXT,
    venue_id INTEGER NOT NULL REFERENCES venues(id),
    kind     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS authors (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS authorships (
    paper_id  INTEGER NOT NULL REFERENCES papers(id),
    author_id INTEGER NOT NULL REFERENCES authors(id),
    position  INTEGER NOT NULL
);
";

/// Opens the catalog database file and ensures the schema exists.
pub fn open_db(path: impl AsRef<Path>) -> Result<Connection, CitedexError> {
    let mut conn = Connection::open(path)?;
    bootstrap_connection(&mut conn)?;
    debug!("catalog database ready (file)");
    Ok(conn)
}

/// Opens an in-memory catalog database, used by tests and dry runs.
pub fn open_db_in_memory() -> Result<Connection, CitedexError> {
    let mut conn = Connection::open_in_memory()?;
    bootstrap_connection(&mut conn)?;
    debug!("catalog database ready (memory)");
    Ok(conn)
}

// Dedup relies on the pre-insert DOI lookup, so papers.doi deliberately
// carries no UNIQUE constraint.
fn bootstrap_connection(conn: &mut Connection) -> Result<(), CitedexError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
