//! The two import queries and their rendering.
//!
//! Queries are written with Drupal's `{table}` placeholder syntax so a
//! table prefix can be applied uniformly. Content types are bound as
//! positional `?` parameters, never spliced into the SQL; the rendered text
//! runs unchanged on SQLite and MySQL.

use drupal_jekyll_core::{ContentRecord, MenuRow};
use rusqlite::{Connection, params_from_iter};

use crate::source::SourceError;

/// Content types imported when none are configured.
pub const DEFAULT_CONTENT_TYPES: &[&str] = &["blog", "story", "article"];

/// Every table the queries and fixture schema refer to.
pub(crate) const TABLES: &[&str] = &["node", "field_data_body", "users", "menu_links"];

// The node id is the part of `link_path` after the first '/' ("node/42").
// The comparison against the INTEGER `nid` column gets numeric affinity.
pub(crate) const MENU_QUERY: &str = "SELECT n.title, n.nid, ml.mlid, ml.plid
     FROM {node} AS n, {menu_links} AS ml
     WHERE n.type IN ({types})
       AND substr(ml.link_path, instr(ml.link_path, '/') + 1) = n.nid
     ORDER BY ml.mlid, n.nid";

pub(crate) const CONTENT_QUERY: &str = "SELECT n.title, fdb.body_value, fdb.body_summary, n.created,
            n.status, n.nid, u.name, ml.link_title, ml.mlid, ml.plid
     FROM {node} AS n, {field_data_body} AS fdb, {users} AS u, {menu_links} AS ml
     WHERE n.type IN ({types})
       AND n.nid = fdb.entity_id
       AND n.vid = fdb.revision_id
       AND n.uid = u.uid
       AND substr(ml.link_path, instr(ml.link_path, '/') + 1) = n.nid
     ORDER BY ml.mlid, n.nid";

/// Table prefix and content-type filter shared by both queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub prefix: String,
    pub types: Vec<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            types: DEFAULT_CONTENT_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl QueryOptions {
    pub fn new(prefix: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            types,
        }
    }

    /// Reject a prefix that could not be a table-name prefix, and an empty
    /// type list (which would render `IN ()`).
    pub fn validate(&self) -> Result<(), SourceError> {
        if !self
            .prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(SourceError::InvalidPrefix(self.prefix.clone()));
        }
        if self.types.is_empty() {
            return Err(SourceError::NoContentTypes);
        }
        Ok(())
    }

    /// Render a `{table}`/`{types}` template into executable SQL.
    pub fn render(&self, template: &str) -> String {
        let placeholders = vec!["?"; self.types.len()].join(", ");
        prefix_tables(template, &self.prefix).replace("{types}", &placeholders)
    }
}

/// Replace each `{table}` placeholder with the prefixed table name.
pub(crate) fn prefix_tables(sql: &str, prefix: &str) -> String {
    TABLES.iter().fold(sql.to_string(), |acc, table| {
        acc.replace(&format!("{{{table}}}"), &format!("{prefix}{table}"))
    })
}

/// Run the menu query (pass 1 input).
pub fn menu_rows(conn: &Connection, options: &QueryOptions) -> Result<Vec<MenuRow>, SourceError> {
    options.validate()?;
    let sql = options.render(MENU_QUERY);
    log::debug!("menu query: {}", sql);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(options.types.iter()), |row| {
        Ok(MenuRow {
            title: row.get(0)?,
            nid: row.get(1)?,
            mlid: row.get(2)?,
            plid: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Run the content query (pass 2 input).
pub fn content_rows(
    conn: &Connection,
    options: &QueryOptions,
) -> Result<Vec<ContentRecord>, SourceError> {
    options.validate()?;
    let sql = options.render(CONTENT_QUERY);
    log::debug!("content query: {}", sql);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(options.types.iter()), row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContentRecord> {
    let status: i64 = row.get(4)?;
    Ok(ContentRecord {
        title: row.get(0)?,
        body: row.get(1)?,
        summary: row.get(2)?,
        created: row.get(3)?,
        published: status == 1,
        nid: row.get(5)?,
        author: row.get(6)?,
        menu_title: row.get(7)?,
        mlid: row.get(8)?,
        plid: row.get(9)?,
    })
}
