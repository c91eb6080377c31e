//! Run configuration and validation.

use crate::error::{Result, SchemaError};

/// Configuration for one conversion run.
#[derive(Debug, Clone)]
pub struct Config {
    /// MySQL connection URL for the source database.
    pub source_url: String,

    /// tokio-postgres connection string for the target database.
    pub target_url: String,

    /// Name of the source database to read metadata from.
    pub database: String,

    /// Pattern for matching table surrogate keys.
    pub key_pattern: String,

    /// Drop every existing table in the target, not just the requested ones.
    pub drop_tables: bool,

    /// Only create tables, skip index statements.
    pub tables_only: bool,

    /// Only create indexes, skip table creation (and drops).
    pub indexes_only: bool,

    /// The tables to process.
    pub tables: Vec<String>,
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.source_url.is_empty() {
            return Err(SchemaError::Config(
                "No MySQL connection URL was given".into(),
            ));
        }
        if self.target_url.is_empty() {
            return Err(SchemaError::Config(
                "No PostgreSQL connection URL was given".into(),
            ));
        }
        if self.database.is_empty() {
            return Err(SchemaError::Config("No source database name was given".into()));
        }
        if self.key_pattern.is_empty() {
            return Err(SchemaError::Config(
                "No surrogate key pattern was given".into(),
            ));
        }
        if self.tables.is_empty() {
            return Err(SchemaError::Config("No table names were given".into()));
        }
        if self.tables_only && self.indexes_only {
            return Err(SchemaError::Config(
                "tables-only and indexes-only are mutually exclusive".into(),
            ));
        }
        Ok(())
    }
}
