//! Catalog type name → Go field type.
//!
//! One table covers the vocabularies of all supported engines. MySQL
//! reports bare names (`int`, `varchar`), PostgreSQL reports SQL standard
//! spellings (`character varying`, `timestamp without time zone`), and
//! SQLite reports whatever was written in the DDL (`VARCHAR(255)`).

use crate::naming::{camel_case, strip_type_prefix};
use crate::schema::Column;

/// Go type used when a catalog type is not recognized.
pub const FALLBACK_GO_TYPE: &str = "interface{}";

/// Map a catalog type name to a Go scalar type.
///
/// Unknown names fall back to [`FALLBACK_GO_TYPE`]. Date and time types map
/// to `string` so the generated file needs no imports.
pub fn go_type(db_type: &str) -> &'static str {
    match normalize(db_type).as_str() {
        "bool" | "boolean" | "bit" => "bool",

        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "int2" | "int4"
        | "smallserial" | "serial" => "int",
        "bigint" | "int8" | "bigserial" => "int64",

        "float" | "real" | "float4" => "float32",
        "double" | "double precision" | "float8" | "decimal" | "numeric" | "money" => "float64",

        "char" | "character" | "nchar" | "varchar" | "character varying" | "nvarchar"
        | "varchar2" | "text" | "tinytext" | "mediumtext" | "longtext" | "clob" | "enum"
        | "set" | "json" | "jsonb" | "uuid" | "citext" | "inet" | "cidr" | "xml" => "string",

        "date" | "datetime" | "timestamp" | "time" | "year" | "interval"
        | "timestamp without time zone" | "timestamp with time zone" | "timestamptz"
        | "time without time zone" | "time with time zone" | "timetz" => "string",

        "blob" | "tinyblob" | "mediumblob" | "longblob" | "binary" | "varbinary" | "bytea" => {
            "[]byte"
        }

        _ => FALLBACK_GO_TYPE,
    }
}

/// Go type of a relation column: a pointer to the referenced entity, with
/// `remove_prefix` stripped from the type name only.
pub fn relation_go_type(column: &Column, remove_prefix: &str) -> String {
    let rendered = camel_case(&column.name);
    format!("*{}", strip_type_prefix(&rendered, remove_prefix))
}

/// Lowercase, drop `(len)`/`(p,s)` and a trailing `unsigned`/`zerofill`.
fn normalize(db_type: &str) -> String {
    let lower = db_type.trim().to_ascii_lowercase();
    let base = match lower.find('(') {
        Some(idx) => {
            let rest = lower[idx..].find(')').map(|end| &lower[idx + end + 1..]);
            format!("{}{}", &lower[..idx], rest.unwrap_or(""))
        }
        None => lower,
    };
    base.split_whitespace()
        .filter(|word| *word != "unsigned" && *word != "zerofill")
        .collect::<Vec<_>>()
        .join(" ")
}
