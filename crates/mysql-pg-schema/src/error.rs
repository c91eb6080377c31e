//! Error types for the schema conversion library.

use thiserror::Error;

/// Main error type for schema conversion operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Configuration error (missing URLs, empty table list, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source database connection or query error
    #[error("Source database error: {0}")]
    Source(#[from] sqlx::Error),

    /// Target database connection or statement error
    #[error("Target database error: {0}")]
    Target(#[from] tokio_postgres::Error),

    /// The surrogate-key pattern is not a valid regular expression
    #[error("Invalid surrogate-key pattern: {0}")]
    KeyPattern(#[from] regex::Error),

    /// A column carries a type code outside the known SQL type taxonomy
    #[error("Unknown SQL type code {code} for column {table}.{column}")]
    UnknownType {
        table: String,
        column: String,
        code: i32,
    },
}

impl SchemaError {
    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for schema conversion operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
