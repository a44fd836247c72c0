//! Drupal 7 database access.
//!
//! Reads the menu and content rows an import needs from a Drupal database,
//! either on a MySQL server or in a SQLite file (rusqlite with the bundled
//! feature). Table prefixes and the content-type filter are applied to both
//! queries.

pub mod mysql_source;
pub mod operations;
pub mod queries;
pub mod schema;
pub mod source;

pub use mysql_source::MysqlSource;
pub use operations::{NewMenuLink, NewNode, insert_menu_link, insert_node, insert_user};
pub use queries::{DEFAULT_CONTENT_TYPES, QueryOptions, content_rows, menu_rows};
pub use schema::{SchemaError, create_schema, open_database, open_memory};
pub use source::{ConnectParams, Driver, DrupalSource, SourceError, SqliteSource};
