//! Configuration file support.
//!
//! Settings are read from `schema2go.toml` in the working directory, or
//! from `<config dir>/schema2go/config.toml`, and can be overridden on the
//! command line.
//!
//! ```toml
//! [database]
//! driver = "postgres"
//! dsn = "postgres://localhost/shop"
//! schema = "public"
//!
//! [output]
//! package = "models"
//! remove = "Tbl"
//! outfile_prefix = "models/shop"
//! ```

use crate::dialect::Dialect;
use crate::emit::{SchemaWriter, DEFAULT_DB_HANDLE_TYPE};
use crate::error::{Error, Result};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "schema2go.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// sqlx connection URL.
    pub dsn: Option<String>,
    pub driver: String,
    pub schema: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub package: String,
    /// Prefix stripped from relation field types.
    pub remove: String,
    /// When set, write `<prefix>_schema.go` and `<prefix>_func.go`
    /// instead of standard output.
    pub outfile_prefix: Option<String>,
    pub db_type: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            driver: "mysql".to_string(),
            schema: "main".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            package: "data".to_string(),
            remove: String::new(),
            outfile_prefix: None,
            db_type: DEFAULT_DB_HANDLE_TYPE.to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("invalid config: {}", e)))
    }

    /// Load the config file at `path`, or the first default location that
    /// exists. No file at all yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }
        match Self::default_paths().into_iter().find(|p| p.exists()) {
            Some(found) => Self::read(&found),
            None => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_toml(&content)
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("schema2go").join("config.toml"));
        }
        paths
    }

    /// Check required settings and resolve the dialect.
    pub fn validate(&self) -> Result<Dialect> {
        match self.database.dsn.as_deref() {
            None | Some("") => {
                return Err(Error::config(
                    "no database DSN. Use --dsn, SCHEMA2GO_DSN, or [database] dsn in the config file",
                ));
            }
            Some(_) => {}
        }
        if self.output.package.trim().is_empty() {
            return Err(Error::config("package name must not be empty"));
        }
        Dialect::from_driver(&self.database.driver)
    }

    /// Code writer for the `[output]` settings.
    pub fn writer(&self) -> SchemaWriter {
        SchemaWriter::new(self.output.package.as_str())
            .remove_from_type(self.output.remove.as_str())
            .db_handle_type(self.output.db_type.as_str())
    }

    /// `(types, funcs)` output paths, if writing to files.
    pub fn output_paths(&self) -> Option<(PathBuf, PathBuf)> {
        self.output.outfile_prefix.as_ref().map(|prefix| {
            (
                PathBuf::from(format!("{}_schema.go", prefix)),
                PathBuf::from(format!("{}_func.go", prefix)),
            )
        })
    }
}
