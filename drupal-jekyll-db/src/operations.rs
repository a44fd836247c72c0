//! Write helpers for building Drupal fixture databases.
//!
//! The importer itself only reads; these exist to seed databases created
//! with [`create_schema`](crate::schema::create_schema).

use rusqlite::{Connection, params};

use crate::queries::prefix_tables;
use crate::source::SourceError;

/// A node together with its current body revision.
#[derive(Debug, Clone, Default)]
pub struct NewNode {
    pub nid: i64,
    pub node_type: String,
    pub title: String,
    pub uid: i64,
    pub published: bool,
    pub created: i64,
    pub body: Option<String>,
    pub summary: Option<String>,
}

/// A menu link pointing at `node/<nid>`.
#[derive(Debug, Clone, Default)]
pub struct NewMenuLink {
    pub mlid: i64,
    pub plid: i64,
    pub nid: i64,
    pub title: String,
}

// ── User Operations ─────────────────────────────────────────────────────────

/// Insert or replace a user.
pub fn insert_user(conn: &Connection, prefix: &str, uid: i64, name: &str) -> Result<(), SourceError> {
    conn.execute(
        &prefix_tables("INSERT OR REPLACE INTO {users} (uid, name) VALUES (?1, ?2)", prefix),
        params![uid, name],
    )?;
    Ok(())
}

// ── Node Operations ─────────────────────────────────────────────────────────

/// Insert a node and its body row. The revision id mirrors the node id.
pub fn insert_node(conn: &Connection, prefix: &str, node: &NewNode) -> Result<(), SourceError> {
    conn.execute(
        &prefix_tables(
            "INSERT INTO {node} (nid, vid, type, title, uid, status, created, changed)
             VALUES (?1, ?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            prefix,
        ),
        params![
            node.nid,
            node.node_type,
            node.title,
            node.uid,
            i64::from(node.published),
            node.created,
        ],
    )?;
    conn.execute(
        &prefix_tables(
            "INSERT INTO {field_data_body} (entity_type, bundle, entity_id, revision_id,
                 body_value, body_summary, body_format)
             VALUES ('node', ?1, ?2, ?2, ?3, ?4, 'filtered_html')",
            prefix,
        ),
        params![node.node_type, node.nid, node.body, node.summary],
    )?;
    Ok(())
}

// ── Menu Operations ─────────────────────────────────────────────────────────

/// Insert a menu link in the main menu.
pub fn insert_menu_link(
    conn: &Connection,
    prefix: &str,
    link: &NewMenuLink,
) -> Result<(), SourceError> {
    conn.execute(
        &prefix_tables(
            "INSERT INTO {menu_links} (menu_name, mlid, plid, link_path, link_title)
             VALUES ('main-menu', ?1, ?2, ?3, ?4)",
            prefix,
        ),
        params![link.mlid, link.plid, format!("node/{}", link.nid), link.title],
    )?;
    Ok(())
}
