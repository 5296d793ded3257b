//! Database schema introspection.
//!
//! Reads the table and column catalogs of a live database through `sqlx`'s
//! Any driver and builds a [`Schema`]. The connection belongs to the caller;
//! it is borrowed for the duration of the run and never closed here.

use crate::dialect::{Dialect, RowShape};
use crate::error::{Error, Result};
use crate::schema::{Schema, Table};

use sqlx::any::AnyRow;
use sqlx::{AnyConnection, Row};

/// Introspect `schema` using the dialect named by `driver`.
pub async fn load_schema_for_driver(
    conn: &mut AnyConnection,
    driver: &str,
    schema: &str,
) -> Result<Schema> {
    let dialect = Dialect::from_driver(driver)?;
    load_schema(conn, dialect, schema).await
}

/// Introspect every table of `schema`.
///
/// Any failing catalog query or unreadable row aborts the run; no partial
/// schema is returned.
pub async fn load_schema(
    conn: &mut AnyConnection,
    dialect: Dialect,
    schema: &str,
) -> Result<Schema> {
    tracing::debug!(%dialect, schema, "loading schema");

    let table_rows: Vec<AnyRow> = sqlx::query(&dialect.list_tables(schema))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| Error::schema_query(format!("tables of {}", schema), e))?;

    let mut result = Schema::new();
    for row in &table_rows {
        let name: String = row
            .try_get(0)
            .map_err(|e| Error::schema_query(format!("table name in {}", schema), e))?;
        let table = load_table(conn, dialect, schema, name).await?;
        result.add_table(table);
    }

    tracing::info!(
        %dialect,
        schema,
        tables = result.tables.len(),
        "schema loaded"
    );
    Ok(result)
}

async fn load_table(
    conn: &mut AnyConnection,
    dialect: Dialect,
    schema: &str,
    name: String,
) -> Result<Table> {
    let context = format!("columns of {}.{}", schema, name);
    let rows: Vec<AnyRow> = sqlx::query(&dialect.list_columns(schema, &name))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| Error::schema_query(context.as_str(), e))?;

    let shape = dialect.column_shape();
    let mut table = Table::new(name);
    for row in &rows {
        let (column, db_type) = scan_column(row, shape, &context)?;
        tracing::debug!(table = %table.name, column = %column, db_type = %db_type, "column");
        table.push_column(column, db_type);
    }

    for stem in table.drop_shadowed_relations() {
        tracing::warn!(
            table = %table.name,
            column = %stem,
            "relation {}_id shadowed by a real column named {}; relation field skipped",
            stem,
            stem
        );
    }

    Ok(table)
}

/// Read `(name, type)` out of a column catalog row of the given shape.
fn scan_column(row: &AnyRow, shape: RowShape, context: &str) -> Result<(String, String)> {
    if row.len() != shape.width {
        return Err(Error::schema_query(
            context,
            sqlx::Error::Decode(
                format!("expected {} fields per row, got {}", shape.width, row.len()).into(),
            ),
        ));
    }
    let name: String = row
        .try_get(shape.name)
        .map_err(|e| Error::schema_query(context, e))?;
    let db_type: String = row
        .try_get(shape.db_type)
        .map_err(|e| Error::schema_query(context, e))?;
    Ok((name, db_type))
}
