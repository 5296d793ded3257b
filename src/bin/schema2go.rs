//! schema2go — Go structs from a live database schema
//!
//! # Usage
//!
//! ```bash
//! # Print structs and accessors to stdout
//! schema2go --driver sqlite3 --dsn app.db
//!
//! # Write shop_schema.go and shop_func.go
//! schema2go --driver postgres --dsn postgres://localhost/shop \
//!     --schema public --package models --outfile-prefix shop
//!
//! # Inspect what was introspected
//! schema2go --driver mysql --dsn mysql://root@localhost/shop --schema shop --dump-model
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use schema2go::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema2go")]
#[command(version)]
#[command(about = "Generate Go structs and sqlx accessors from a database schema", long_about = None)]
#[command(after_help = "EXAMPLES:
    schema2go --driver sqlite3 --dsn app.db
    schema2go --driver mysql --dsn mysql://root@localhost/shop --schema shop --remove Tbl
    schema2go --driver postgres --dsn postgres://localhost/shop --schema public --outfile-prefix models/shop")]
struct Cli {
    /// Database URL (sqlx format; a bare path is accepted for sqlite3)
    #[arg(long, env = "SCHEMA2GO_DSN")]
    dsn: Option<String>,

    /// Driver: mysql, postgres, or sqlite3 [default: mysql]
    #[arg(long)]
    driver: Option<String>,

    /// Schema (database) to introspect [default: main]
    #[arg(long)]
    schema: Option<String>,

    /// Write <PREFIX>_schema.go and <PREFIX>_func.go instead of stdout
    #[arg(long)]
    outfile_prefix: Option<String>,

    /// Go package name [default: data]
    #[arg(long)]
    package: Option<String>,

    /// Prefix removed from the head of relation type names
    #[arg(long)]
    remove: Option<String>,

    /// Go type of the db handle taken by generated accessors [default: Queryer]
    #[arg(long)]
    db_type: Option<String>,

    /// Config file [default: ./schema2go.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the introspected schema as JSON instead of Go code
    #[arg(long)]
    dump_model: bool,

    /// Print debugging output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags win over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(dsn) = &self.dsn {
            config.database.dsn = Some(dsn.clone());
        }
        if let Some(driver) = &self.driver {
            config.database.driver = driver.clone();
        }
        if let Some(schema) = &self.schema {
            config.database.schema = schema.clone();
        }
        if let Some(prefix) = &self.outfile_prefix {
            config.output.outfile_prefix = Some(prefix.clone());
        }
        if let Some(package) = &self.package {
            config.output.package = package.clone();
        }
        if let Some(remove) = &self.remove {
            config.output.remove = remove.clone();
        }
        if let Some(db_type) = &self.db_type {
            config.output.db_type = db_type.clone();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "schema2go=debug" } else { "schema2go=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    let dialect = config.validate()?;

    let dsn = config.database.dsn.as_deref().unwrap_or_default();
    let url = dialect.connection_url(dsn);

    sqlx::any::install_default_drivers();
    let mut conn = AnyConnection::connect(&url).await.map_err(Error::Connection)?;
    conn.ping().await.map_err(Error::Connection)?;
    tracing::debug!(%dialect, "ping worked");

    let schema = &config.database.schema;
    let outcome = if cli.dump_model {
        dump_model(&mut conn, dialect, schema).await
    } else {
        generate_code(&mut conn, dialect, &config).await
    };

    if let Err(e) = conn.close().await {
        tracing::warn!("failed to close connection: {}", e);
    }
    outcome
}

async fn dump_model(conn: &mut AnyConnection, dialect: Dialect, schema: &str) -> Result<()> {
    let model = load_schema(conn, dialect, schema).await?;
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}

async fn generate_code(conn: &mut AnyConnection, dialect: Dialect, config: &Config) -> Result<()> {
    let code = schema2go::generate(conn, dialect, &config.database.schema, &config.writer()).await?;

    match config.output_paths() {
        None => {
            code.write_to(&mut std::io::stdout(), &mut std::io::stdout())?;
        }
        Some((types_path, funcs_path)) => {
            let mut types = BufWriter::new(
                File::create(&types_path)
                    .with_context(|| format!("failed to create {}", types_path.display()))?,
            );
            let mut funcs = BufWriter::new(
                File::create(&funcs_path)
                    .with_context(|| format!("failed to create {}", funcs_path.display()))?,
            );
            code.write_to(&mut types, &mut funcs)?;
            eprintln!(
                "{} Wrote {} and {}",
                "✓".green(),
                types_path.display().to_string().cyan(),
                funcs_path.display().to_string().cyan()
            );
        }
    }
    Ok(())
}
