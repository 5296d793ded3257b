//! In-memory schema model filled in by the introspector.

use crate::naming::foreign_key_stem;
use serde::Serialize;

/// `db_type` marker of a synthesized relation column.
pub const RELATION_DB_TYPE: &str = "table";

/// All tables discovered in one introspection run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub tables: Vec<Table>,
}

/// A table and its columns in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// A catalog column, or a relation placeholder inferred from a `<stem>_id`
/// column (`db_type == "table"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub db_type: String,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the schema.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Look up a table by catalog name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a catalog column. A `<stem>_id` column is followed by a
    /// synthesized `<stem>` relation column.
    pub fn push_column(&mut self, name: impl Into<String>, db_type: impl Into<String>) {
        let column = Column::new(name, db_type);
        let relation = foreign_key_stem(&column.name).map(Column::relation);
        self.columns.push(column);
        if let Some(relation) = relation {
            self.columns.push(relation);
        }
    }

    /// Builder form of [`Table::push_column`].
    pub fn column(mut self, name: impl Into<String>, db_type: impl Into<String>) -> Self {
        self.push_column(name, db_type);
        self
    }

    /// Columns backed by the catalog.
    pub fn real_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_relation())
    }

    /// Synthesized relation columns.
    pub fn relation_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_relation())
    }

    /// Remove relation columns whose name equals a real column of this
    /// table, returning the removed names. Keeping both would emit two Go
    /// fields with the same name.
    pub fn drop_shadowed_relations(&mut self) -> Vec<String> {
        let real: Vec<String> = self.real_columns().map(|c| c.name.clone()).collect();
        let mut dropped = Vec::new();
        self.columns.retain(|c| {
            if c.is_relation() && real.contains(&c.name) {
                dropped.push(c.name.clone());
                false
            } else {
                true
            }
        });
        dropped
    }
}

impl Column {
    pub fn new(name: impl Into<String>, db_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_type: db_type.into(),
        }
    }

    /// Relation placeholder pointing at the `stem` entity.
    pub fn relation(stem: &str) -> Self {
        Self::new(stem, RELATION_DB_TYPE)
    }

    pub fn is_relation(&self) -> bool {
        self.db_type == RELATION_DB_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_follows_its_foreign_key() {
        let table = Table::new("users")
            .column("id", "integer")
            .column("team_id", "integer")
            .column("name", "text");

        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "team_id", "team", "name"]);
        assert_eq!(table.columns[2], Column::relation("team"));
        assert_eq!(table.columns[2].db_type, "table");
    }

    #[test]
    fn test_real_and_relation_partitions() {
        let table = Table::new("posts")
            .column("id", "int")
            .column("author_id", "int")
            .column("board_id", "int");

        let real: Vec<&str> = table.real_columns().map(|c| c.name.as_str()).collect();
        let rel: Vec<&str> = table.relation_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(real, ["id", "author_id", "board_id"]);
        assert_eq!(rel, ["author", "board"]);
    }

    #[test]
    fn test_plain_id_is_not_a_relation() {
        let table = Table::new("teams").column("id", "int");
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.relation_columns().count(), 0);
    }

    #[test]
    fn test_drop_shadowed_relations() {
        let mut table = Table::new("users")
            .column("team_id", "int")
            .column("team", "varchar");

        let dropped = table.drop_shadowed_relations();
        assert_eq!(dropped, ["team"]);
        assert_eq!(table.relation_columns().count(), 0);
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn test_schema_lookup() {
        let mut schema = Schema::new();
        assert!(schema.is_empty());
        schema.add_table(Table::new("users"));
        assert!(schema.table("users").is_some());
        assert!(schema.table("teams").is_none());
    }
}
