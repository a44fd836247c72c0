//! Opening Drupal databases, and the table subset the importer reads.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::queries::prefix_tables;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database not found: {0}")]
    NotFound(String),
}

/// Open an existing Drupal database read-only.
///
/// The import never writes to the source, so a missing file is an error
/// rather than an invitation to create an empty database.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    if !path.is_file() {
        return Err(SchemaError::NotFound(path.display().to_string()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
    )?;
    Ok(conn)
}

/// Open an in-memory database holding the importer's table subset. Useful for testing.
pub fn open_memory(prefix: &str) -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn, prefix)?;
    Ok(conn)
}

/// Create the Drupal 7 tables the import queries touch, with an optional
/// table prefix.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection, prefix: &str) -> Result<(), SchemaError> {
    conn.execute_batch(&prefix_tables(SCHEMA_SQL, prefix))?;
    Ok(())
}

// Column names and defaults follow Drupal 7's node, field_data_body, users
// and menu_links tables; unused columns are left out.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS {node} (
    nid INTEGER PRIMARY KEY,
    vid INTEGER NOT NULL DEFAULT 0,
    type TEXT NOT NULL DEFAULT '',
    title TEXT NOT NULL DEFAULT '',
    uid INTEGER NOT NULL DEFAULT 0,
    status INTEGER NOT NULL DEFAULT 1,
    created INTEGER NOT NULL DEFAULT 0,
    changed INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS {field_data_body} (
    entity_type TEXT NOT NULL DEFAULT 'node',
    bundle TEXT NOT NULL DEFAULT '',
    deleted INTEGER NOT NULL DEFAULT 0,
    entity_id INTEGER NOT NULL,
    revision_id INTEGER,
    language TEXT NOT NULL DEFAULT 'und',
    delta INTEGER NOT NULL DEFAULT 0,
    body_value TEXT,
    body_summary TEXT,
    body_format TEXT,
    PRIMARY KEY (entity_type, entity_id, deleted, delta, language)
);

CREATE TABLE IF NOT EXISTS {users} (
    uid INTEGER PRIMARY KEY,
    name TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS {menu_links} (
    menu_name TEXT NOT NULL DEFAULT '',
    mlid INTEGER PRIMARY KEY,
    plid INTEGER NOT NULL DEFAULT 0,
    link_path TEXT NOT NULL DEFAULT '',
    link_title TEXT NOT NULL DEFAULT '',
    weight INTEGER NOT NULL DEFAULT 0,
    depth INTEGER NOT NULL DEFAULT 0
);
"#;
