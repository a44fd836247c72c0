//! [`RowSource`] implementations over a Drupal database.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use drupal_jekyll_core::{ContentRecord, MenuRow, RowSource};
use rusqlite::Connection;
use thiserror::Error;

use crate::mysql_source::MysqlSource;
use crate::queries::{self, QueryOptions};
use crate::schema::{self, SchemaError};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("MySQL error: {0}")]
    Mysql(#[from] mysql::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Unexpected column types: {0}")]
    Row(String),
    #[error("Unknown database driver '{0}' (expected mysql or sqlite)")]
    UnknownDriver(String),
    #[error("Invalid table prefix '{0}': only letters, digits and '_' are allowed")]
    InvalidPrefix(String),
    #[error("No content types selected")]
    NoContentTypes,
}

/// Which database server holds the Drupal site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Driver {
    /// A MySQL server reached with dbname, user, password and host.
    #[default]
    Mysql,
    /// A SQLite file; `dbname` is its path.
    Sqlite,
}

impl Driver {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(SourceError::UnknownDriver(s.to_string())),
        }
    }
}

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub driver: Driver,
    pub dbname: String,
    pub user: String,
    pub password: String,
    /// Host name, optionally followed by `:port`
    pub host: String,
}

/// Drupal database opened for an import, whichever driver it uses.
pub enum DrupalSource {
    Mysql(MysqlSource),
    Sqlite(SqliteSource),
}

impl DrupalSource {
    pub fn open(params: &ConnectParams, options: QueryOptions) -> Result<Self, SourceError> {
        match params.driver {
            Driver::Mysql => MysqlSource::connect(params, options).map(Self::Mysql),
            Driver::Sqlite => {
                log::debug!("SQLite driver: user and host settings are not used");
                SqliteSource::open(Path::new(&params.dbname), options).map(Self::Sqlite)
            }
        }
    }

    pub fn driver(&self) -> Driver {
        match self {
            Self::Mysql(_) => Driver::Mysql,
            Self::Sqlite(_) => Driver::Sqlite,
        }
    }
}

impl RowSource for DrupalSource {
    type Error = SourceError;

    fn menu_rows(&self) -> Result<Vec<MenuRow>, SourceError> {
        match self {
            Self::Mysql(s) => s.menu_rows(),
            Self::Sqlite(s) => s.menu_rows(),
        }
    }

    fn content_rows(&self) -> Result<Vec<ContentRecord>, SourceError> {
        match self {
            Self::Mysql(s) => s.content_rows(),
            Self::Sqlite(s) => s.content_rows(),
        }
    }
}

/// Drupal SQLite database.
pub struct SqliteSource {
    conn: Connection,
    options: QueryOptions,
}

impl SqliteSource {
    /// Open the database at `path` read-only.
    pub fn open(path: &Path, options: QueryOptions) -> Result<Self, SourceError> {
        options.validate()?;
        let conn = schema::open_database(path)?;
        log::debug!(
            "Opened {} (prefix '{}', types {:?})",
            path.display(),
            options.prefix,
            options.types
        );
        Ok(Self { conn, options })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection, options: QueryOptions) -> Result<Self, SourceError> {
        options.validate()?;
        Ok(Self { conn, options })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RowSource for SqliteSource {
    type Error = SourceError;

    fn menu_rows(&self) -> Result<Vec<MenuRow>, SourceError> {
        queries::menu_rows(&self.conn, &self.options)
    }

    fn content_rows(&self) -> Result<Vec<ContentRecord>, SourceError> {
        queries::content_rows(&self.conn, &self.options)
    }
}
