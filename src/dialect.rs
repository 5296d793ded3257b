//! Catalog queries per database engine.
//!
//! Each [`Dialect`] knows how to ask its engine for the tables of a schema
//! and for the columns of one table. The engines disagree on the shape of
//! the column rows they return, which is described by [`RowShape`] so the
//! introspector can read either.

use crate::error::{Error, Result};
use std::fmt;

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
}

/// Layout of one row returned by a column catalog query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowShape {
    /// Number of fields in the row.
    pub width: usize,
    /// Index of the column name field.
    pub name: usize,
    /// Index of the column type field.
    pub db_type: usize,
}

impl RowShape {
    /// `(name, type)` as reported by `information_schema.columns`.
    pub const NAME_TYPE: RowShape = RowShape {
        width: 2,
        name: 0,
        db_type: 1,
    };

    /// `(cid, name, type, notnull, dflt_value, pk)` from `PRAGMA table_info`.
    pub const PRAGMA_TABLE_INFO: RowShape = RowShape {
        width: 6,
        name: 1,
        db_type: 2,
    };
}

impl Dialect {
    /// Resolve a driver identifier such as `mysql`, `postgres` or `sqlite3`.
    pub fn from_driver(driver: &str) -> Result<Self> {
        match driver.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pgx" => Ok(Dialect::Postgres),
            "sqlite3" | "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(Error::config(format!(
                "unknown driver '{}'. Expected: mysql, postgres, or sqlite3",
                driver
            ))),
        }
    }

    /// Canonical driver name.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite3",
        }
    }

    /// Query listing the table names of `schema`, one per row.
    pub fn list_tables(&self, schema: &str) -> String {
        match self {
            // information_schema text columns may arrive as BLOB on MySQL 8
            Dialect::MySql => format!(
                "SELECT CAST(table_name AS CHAR(255)) FROM information_schema.tables \
                 WHERE table_schema = {} AND table_type = 'BASE TABLE' \
                 ORDER BY table_name",
                quote_literal(schema)
            ),
            Dialect::Postgres => format!(
                "SELECT table_name::text FROM information_schema.tables \
                 WHERE table_schema = {} AND table_type = 'BASE TABLE' \
                 ORDER BY table_name",
                quote_literal(schema)
            ),
            Dialect::Sqlite => format!(
                "SELECT name FROM {}.sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
                quote_ident(schema)
            ),
        }
    }

    /// Query listing the columns of `table`, in ordinal order.
    pub fn list_columns(&self, schema: &str, table: &str) -> String {
        match self {
            Dialect::MySql => format!(
                "SELECT CAST(column_name AS CHAR(255)), CAST(data_type AS CHAR(255)) \
                 FROM information_schema.columns \
                 WHERE table_schema = {} AND table_name = {} \
                 ORDER BY ordinal_position",
                quote_literal(schema),
                quote_literal(table)
            ),
            Dialect::Postgres => format!(
                "SELECT column_name::text, data_type::text FROM information_schema.columns \
                 WHERE table_schema = {} AND table_name = {} \
                 ORDER BY ordinal_position",
                quote_literal(schema),
                quote_literal(table)
            ),
            Dialect::Sqlite => format!(
                "PRAGMA {}.table_info({})",
                quote_ident(schema),
                quote_ident(table)
            ),
        }
    }

    /// Turn a DSN into a URL sqlx can route to this dialect's driver.
    ///
    /// URLs are passed through. A bare SQLite path (as accepted by Go's
    /// sqlite3 driver) becomes a `sqlite://` URL.
    pub fn connection_url(&self, dsn: &str) -> String {
        match self {
            Dialect::Sqlite if !dsn.starts_with("sqlite:") => format!("sqlite://{}", dsn),
            _ => dsn.to_string(),
        }
    }

    /// Row layout of [`Dialect::list_columns`] results.
    pub fn column_shape(&self) -> RowShape {
        match self {
            Dialect::MySql | Dialect::Postgres => RowShape::NAME_TYPE,
            Dialect::Sqlite => RowShape::PRAGMA_TABLE_INFO,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single-quoted SQL string literal.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Double-quoted SQL identifier.
fn quote_ident(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
