//! Go code generation from a [`Schema`].
//!
//! Produces two files worth of text: one with a struct per table (the
//! "types" stream) and one with accessor methods per table (the "functions"
//! stream). Both start with the same `package` clause. Output depends only
//! on the schema and the writer settings, so repeated runs are identical.

use crate::error::Result;
use crate::naming::{camel_case, is_foreign_key};
use crate::schema::{Column, Schema, Table};
use crate::typemap::{go_type, relation_go_type};

use std::io::Write;

/// Error text `database/sql` returns when a query matched no rows.
pub const NO_ROWS_MESSAGE: &str = "sql: no rows in result set";

/// Default handle type accepted by generated accessors. Anything with
/// sqlx-style `Get` and `Select` methods satisfies it, e.g. `*sqlx.DB`.
pub const DEFAULT_DB_HANDLE_TYPE: &str = "Queryer";

/// Width of the Go type column in struct fields.
const TYPE_COLUMN_WIDTH: usize = 10;

/// Renders tables as Go source.
#[derive(Debug, Clone)]
pub struct SchemaWriter {
    /// Go package name written at the top of both streams.
    pub package_name: String,
    /// Prefix removed from the pointee type of relation fields.
    pub remove_from_type: String,
    /// Go type of the `db` parameter of generated accessors.
    pub db_handle_type: String,
}

/// Both generated streams, fully rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub types: String,
    pub funcs: String,
}

impl SchemaWriter {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            remove_from_type: String::new(),
            db_handle_type: DEFAULT_DB_HANDLE_TYPE.to_string(),
        }
    }

    pub fn remove_from_type(mut self, prefix: impl Into<String>) -> Self {
        self.remove_from_type = prefix.into();
        self
    }

    pub fn db_handle_type(mut self, handle: impl Into<String>) -> Self {
        self.db_handle_type = handle.into();
        self
    }

    /// Render both streams.
    pub fn render(&self, schema: &Schema) -> GeneratedCode {
        GeneratedCode {
            types: self.render_types(schema),
            funcs: self.render_funcs(schema),
        }
    }

    /// The types stream: package clause, then one struct per table.
    pub fn render_types(&self, schema: &Schema) -> String {
        let mut out = self.package_clause();
        for table in &schema.tables {
            self.write_type(&mut out, table);
        }
        out
    }

    /// The functions stream: package clause, then the accessors of every table.
    pub fn render_funcs(&self, schema: &Schema) -> String {
        let mut out = self.package_clause();
        for table in &schema.tables {
            self.write_func(&mut out, table);
        }
        out
    }

    fn package_clause(&self) -> String {
        format!("package {}\n\n", self.package_name)
    }

    /// Append the struct declaration of `table`.
    ///
    /// Real columns come first in catalog order, then a blank line and the
    /// relation fields if there are any. The name column is padded to the
    /// longest column name of the table, raw or rendered, whichever is wider.
    pub fn write_type(&self, out: &mut String, table: &Table) {
        out.push_str(&format!("\ntype {} struct {{\n", camel_case(&table.name)));

        let width = table
            .columns
            .iter()
            .map(|c| c.name.chars().count().max(camel_case(&c.name).chars().count()))
            .max()
            .unwrap_or(0);

        for column in table.real_columns() {
            push_field(out, &camel_case(&column.name), go_type(&column.db_type), column, width);
        }

        let relations: Vec<&Column> = table.relation_columns().collect();
        if !relations.is_empty() {
            out.push('\n');
        }
        for column in relations {
            let go_type = relation_go_type(column, &self.remove_from_type);
            push_field(out, &camel_case(&column.name), &go_type, column, width);
        }

        out.push_str("}\n");
    }

    /// Append the accessors of `table`.
    ///
    /// `Table()` and `Get()` are always emitted. A `GetBy<Column>()` lookup
    /// is emitted only when the table has exactly one `_id` column; with two
    /// or more, none are.
    pub fn write_func(&self, out: &mut String, table: &Table) {
        let ty = camel_case(&table.name);
        let name = &table.name;
        let db = &self.db_handle_type;

        out.push_str(&format!(
            r#"
func (this {ty}) Table() string {{
    return "{name}"
}}

func (this {ty}) Get(db {db}, id int) *{ty} {{
    row := {ty}{{}}
    sql := "SELECT * FROM {name} WHERE id = ? LIMIT 1"
    err := db.Get(&row, sql, id)
    if err != nil {{
        if err.Error() == "{NO_ROWS_MESSAGE}" {{
            return nil
        }} else {{
            panic(err)
        }}
    }}
    return &row
}}
"#
        ));

        let foreign_keys: Vec<&Column> = table
            .real_columns()
            .filter(|c| is_foreign_key(&c.name))
            .collect();
        if foreign_keys.len() != 1 {
            return;
        }

        for column in foreign_keys {
            let col = &column.name;
            let method = camel_case(col);
            out.push_str(&format!(
                r#"
func (this {ty}) GetBy{method}(db {db}, id int) *[]{ty} {{
    rows := []{ty}{{}}
    sql := "SELECT * FROM {name} WHERE {col} = ?"
    err := db.Select(&rows, sql, id)
    if err != nil {{
        if err.Error() == "{NO_ROWS_MESSAGE}" {{
            return nil
        }} else {{
            panic(err)
        }}
    }}
    return &rows
}}

"#
            ));
        }
    }
}

impl GeneratedCode {
    /// Write the types and functions streams. They may be the same sink.
    pub fn write_to(&self, types: &mut impl Write, funcs: &mut impl Write) -> Result<()> {
        types.write_all(self.types.as_bytes())?;
        types.flush()?;
        funcs.write_all(self.funcs.as_bytes())?;
        funcs.flush()?;
        Ok(())
    }
}

fn push_field(out: &mut String, field: &str, go_type: &str, column: &Column, width: usize) {
    out.push_str(&format!(
        "\t{field:<width$} {go_type:<tw$} `json:\"{col}\" db:\"{col}\"`\n",
        tw = TYPE_COLUMN_WIDTH,
        col = column.name,
    ));
}
