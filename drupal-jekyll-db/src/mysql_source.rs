//! Drupal sites on a MySQL server.
//!
//! Runs the same rendered queries as the SQLite source. Rows come back as
//! column tuples and are converted with [`mysql::from_row_opt`], so a column
//! of an unexpected type surfaces as [`SourceError::Row`] instead of a panic.

use std::cell::RefCell;

use drupal_jekyll_core::{ContentRecord, MenuRow, RowSource};
use mysql::prelude::Queryable;
use mysql::{Conn, Opts, OptsBuilder, Row, from_row_opt};

use crate::queries::{CONTENT_QUERY, MENU_QUERY, QueryOptions};
use crate::source::{ConnectParams, SourceError};

/// `n.title, n.nid, ml.mlid, ml.plid`
pub(crate) type MenuColumns = (String, i64, i64, i64);

/// `n.title, body_value, body_summary, n.created, n.status, n.nid, u.name,
/// ml.link_title, ml.mlid, ml.plid`
pub(crate) type ContentColumns = (
    String,
    Option<String>,
    Option<String>,
    i64,
    i64,
    i64,
    Option<String>,
    Option<String>,
    i64,
    i64,
);

/// A single MySQL connection used for both passes.
pub struct MysqlSource {
    conn: RefCell<Conn>,
    options: QueryOptions,
}

impl MysqlSource {
    pub fn connect(params: &ConnectParams, options: QueryOptions) -> Result<Self, SourceError> {
        options.validate()?;
        let conn = Conn::new(connect_opts(params))?;
        log::debug!(
            "Connected to MySQL database '{}' on {} as '{}'",
            params.dbname,
            params.host,
            params.user
        );
        Ok(Self {
            conn: RefCell::new(conn),
            options,
        })
    }

    fn query(&self, template: &str) -> Result<Vec<Row>, SourceError> {
        let sql = self.options.render(template);
        log::debug!("query: {}", sql);
        let rows: Vec<Row> = self
            .conn
            .borrow_mut()
            .exec(sql.as_str(), self.options.types.clone())?;
        Ok(rows)
    }
}

impl RowSource for MysqlSource {
    type Error = SourceError;

    fn menu_rows(&self) -> Result<Vec<MenuRow>, SourceError> {
        self.query(MENU_QUERY)?
            .into_iter()
            .map(|row| {
                from_row_opt::<MenuColumns>(row)
                    .map(menu_row)
                    .map_err(|e| SourceError::Row(e.to_string()))
            })
            .collect()
    }

    fn content_rows(&self) -> Result<Vec<ContentRecord>, SourceError> {
        self.query(CONTENT_QUERY)?
            .into_iter()
            .map(|row| {
                from_row_opt::<ContentColumns>(row)
                    .map(content_record)
                    .map_err(|e| SourceError::Row(e.to_string()))
            })
            .collect()
    }
}

/// Connection options for the server named by `params`.
pub(crate) fn connect_opts(params: &ConnectParams) -> Opts {
    let (host, port) = split_host(&params.host);
    let mut builder = OptsBuilder::new()
        .ip_or_hostname(Some(host))
        .user(Some(params.user.clone()))
        .pass((!params.password.is_empty()).then(|| params.password.clone()))
        .db_name(Some(params.dbname.clone()));
    if let Some(port) = port {
        builder = builder.tcp_port(port);
    }
    builder.into()
}

/// Split `host:port`. Anything that does not end in a valid port is taken
/// as a bare host name.
pub(crate) fn split_host(host: &str) -> (String, Option<u16>) {
    match host.rsplit_once(':') {
        Some((name, port)) if !name.is_empty() && !name.contains(':') => match port.parse() {
            Ok(port) => (name.to_string(), Some(port)),
            Err(_) => (host.to_string(), None),
        },
        _ => (host.to_string(), None),
    }
}

pub(crate) fn menu_row((title, nid, mlid, plid): MenuColumns) -> MenuRow {
    MenuRow {
        title,
        nid,
        mlid,
        plid,
    }
}

pub(crate) fn content_record(columns: ContentColumns) -> ContentRecord {
    let (title, body, summary, created, status, nid, author, menu_title, mlid, plid) = columns;
    ContentRecord {
        title,
        body,
        summary,
        created,
        published: status == 1,
        author,
        nid,
        menu_title,
        mlid,
        plid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Driver;

    fn params(host: &str, password: &str) -> ConnectParams {
        ConnectParams {
            driver: Driver::Mysql,
            dbname: "drupal7".to_string(),
            user: "editor".to_string(),
            password: password.to_string(),
            host: host.to_string(),
        }
    }

    #[test]
    fn options_carry_every_connection_setting() {
        let opts = connect_opts(&params("db.internal", "s3cret"));
        assert_eq!(opts.get_ip_or_hostname(), "db.internal");
        assert_eq!(opts.get_user(), Some("editor"));
        assert_eq!(opts.get_pass(), Some("s3cret"));
        assert_eq!(opts.get_db_name(), Some("drupal7"));
        assert_eq!(opts.get_tcp_port(), 3306);
    }

    #[test]
    fn empty_password_is_not_sent() {
        let opts = connect_opts(&params("localhost", ""));
        assert_eq!(opts.get_pass(), None);
    }

    #[test]
    fn host_may_carry_a_port() {
        let opts = connect_opts(&params("db.internal:3307", ""));
        assert_eq!(opts.get_ip_or_hostname(), "db.internal");
        assert_eq!(opts.get_tcp_port(), 3307);
    }

    #[test]
    fn split_host_forms() {
        assert_eq!(split_host("localhost"), ("localhost".to_string(), None));
        assert_eq!(split_host("db:3307"), ("db".to_string(), Some(3307)));
        assert_eq!(split_host("db:port"), ("db:port".to_string(), None));
        assert_eq!(split_host("::1"), ("::1".to_string(), None));
    }

    #[test]
    fn status_one_is_published() {
        let columns: ContentColumns = (
            "Jane Doe".to_string(),
            Some("<p>Hi</p>".to_string()),
            None,
            1_300_000_000,
            1,
            3,
            Some("admin".to_string()),
            Some("Jane".to_string()),
            12,
            11,
        );
        let record = content_record(columns.clone());
        assert!(record.published);
        assert_eq!(record.nid, 3);
        assert_eq!(record.author.as_deref(), Some("admin"));
        assert_eq!(record.menu_title.as_deref(), Some("Jane"));
        assert_eq!((record.mlid, record.plid), (12, 11));

        let mut draft = columns;
        draft.4 = 0;
        assert!(!content_record(draft).published);
    }

    #[test]
    fn menu_columns_map_in_query_order() {
        let row = menu_row(("Products".to_string(), 1, 10, 0));
        assert_eq!(row.title, "Products");
        assert_eq!((row.nid, row.mlid, row.plid), (1, 10, 0));
    }

    #[test]
    fn unreachable_server_is_an_error() {
        // Nothing listens on port 1
        let err = MysqlSource::connect(&params("127.0.0.1:1", ""), QueryOptions::default())
            .err()
            .expect("connection should fail");
        assert!(matches!(err, SourceError::Mysql(_)));
    }

    #[test]
    fn options_are_checked_before_connecting() {
        let options = QueryOptions::new("bad prefix", vec!["blog".to_string()]);
        let err = MysqlSource::connect(&params("127.0.0.1:1", ""), options)
            .err()
            .expect("invalid prefix should fail");
        assert!(matches!(err, SourceError::InvalidPrefix(_)));
    }
}
