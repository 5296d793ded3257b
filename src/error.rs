//! Error types for schema2go.

use thiserror::Error;

/// The main error type for introspection and code generation.
///
/// The generated Go accessors have their own, much thinner error story
/// (`nil` for "no rows", `panic` for everything else); nothing here models
/// that.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown driver, missing required input, or an unusable config file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A catalog query or a row scan failed. Aborts the whole run.
    #[error("Schema query failed ({context}): {source}")]
    SchemaQuery {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// Opening or pinging the database failed.
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Writing one of the output streams failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Wrap a catalog failure with a description of what was being read.
    pub fn schema_query(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::SchemaQuery {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for schema2go operations.
pub type Result<T> = std::result::Result<T, Error>;
