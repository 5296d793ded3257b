//! # schema2go
//!
//! > **Point it at a database. Get Go structs back.**
//!
//! schema2go reads the table and column catalogs of a MySQL, PostgreSQL or
//! SQLite database and generates Go source: one struct per table with
//! `json`/`db` tags, and a handful of sqlx-style accessors.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use schema2go::prelude::*;
//!
//! sqlx::any::install_default_drivers();
//! let mut conn = AnyConnection::connect("sqlite://app.db").await?;
//!
//! let schema = load_schema(&mut conn, Dialect::Sqlite, "main").await?;
//! let code = SchemaWriter::new("data").render(&schema);
//! print!("{}{}", code.types, code.funcs);
//! ```
//!
//! ## Naming rules
//!
//! | Catalog          | Go                                   |
//! |------------------|--------------------------------------|
//! | table `users`    | `type Users struct`                  |
//! | column `team_id` | field `TeamId`, plus `Team *Team`    |
//! | one `_id` column | `GetByTeamId(db, id) *[]Users`       |

pub mod config;
pub mod dialect;
pub mod emit;
pub mod error;
pub mod introspect;
pub mod naming;
pub mod schema;
pub mod typemap;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::dialect::{Dialect, RowShape};
    pub use crate::emit::{GeneratedCode, SchemaWriter};
    pub use crate::error::Error;
    pub use crate::introspect::{load_schema, load_schema_for_driver};
    pub use crate::naming::{camel_case, strip_type_prefix};
    pub use crate::schema::{Column, Schema, Table};
    pub use crate::typemap::go_type;
    pub use sqlx::AnyConnection;
    pub use sqlx::Connection;
}

/// Introspect `schema` over `conn` and render both Go streams.
///
/// Nothing is produced unless introspection succeeds completely.
pub async fn generate(
    conn: &mut sqlx::AnyConnection,
    dialect: dialect::Dialect,
    schema: &str,
    writer: &emit::SchemaWriter,
) -> error::Result<emit::GeneratedCode> {
    let model = introspect::load_schema(conn, dialect, schema).await?;
    Ok(writer.render(&model))
}
