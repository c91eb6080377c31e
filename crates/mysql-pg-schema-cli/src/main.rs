//! mysql-pg-schema CLI - MySQL to PostgreSQL table schema conversion.

use clap::Parser;
use mysql_pg_schema::{Config, Migrator, MysqlSource, PgExecutor, SchemaError};
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "mysql-pg-schema")]
#[command(about = "Recreate MySQL table schemas in PostgreSQL")]
#[command(version)]
struct Cli {
    /// Connection URL for the source MySQL database
    #[arg(long, value_name = "URL")]
    mysql_url: String,

    /// Connection string for the target PostgreSQL database
    #[arg(long, value_name = "URL")]
    pg_url: String,

    /// Name of the source MySQL database
    #[arg(long, value_name = "NAME")]
    database: String,

    /// Pattern for matching table surrogate keys
    #[arg(long, value_name = "PATTERN")]
    key_pattern: String,

    /// Drop every existing table in the target database, not just the named ones
    #[arg(long)]
    drop_tables: bool,

    /// Only create tables, skip index statements
    #[arg(long, conflicts_with = "indexes_only")]
    tables_only: bool,

    /// Only create indexes, skip table creation
    #[arg(long)]
    indexes_only: bool,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    /// Names of the tables to convert
    #[arg(value_name = "TABLE", required = true)]
    tables: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SchemaError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity)?;

    let config = Config {
        source_url: cli.mysql_url,
        target_url: cli.pg_url,
        database: cli.database,
        key_pattern: cli.key_pattern,
        drop_tables: cli.drop_tables,
        tables_only: cli.tables_only,
        indexes_only: cli.indexes_only,
        tables: cli.tables,
    };
    config.validate()?;

    let source = MysqlSource::connect(&config.source_url)?;
    let sink = PgExecutor::connect(&config.target_url).await?;

    let summary = Migrator::new(&source, &sink, &config).run().await?;

    info!(
        "converted {} tables: {} statements executed, {} failed",
        summary.tables_processed, summary.statements_executed, summary.statements_failed
    );
    Ok(())
}

fn setup_logging(verbosity: &str) -> Result<(), SchemaError> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            return Err(SchemaError::Config(format!(
                "Invalid verbosity '{}'. Valid options: debug, info, warn, error",
                other
            )));
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
    Ok(())
}
