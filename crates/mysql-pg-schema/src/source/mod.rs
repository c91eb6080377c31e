//! Metadata extraction from a source database.
//!
//! A [`MetadataSource`] yields raw table/column/index metadata rows;
//! [`MetaDataReader`] walks a source and maps the rows into
//! [`TableDefinition`] values. Extraction is best-effort: a failure on one
//! table is reported and the partial definition accumulated so far is kept,
//! and a source that cannot be reached at all yields an empty result set
//! rather than an error.

mod mysql;

pub use mysql::MysqlSource;

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::model::{ColumnDefinition, TableBuilder, TableDefinition};

/// One raw column metadata row.
///
/// Nullability and auto-increment are flag texts; the case-insensitive token
/// `"YES"` means true and everything else, including absence, means false.
#[derive(Debug, Clone)]
pub struct ColumnRow {
    pub name: String,
    pub type_code: i32,
    pub nullable: Option<String>,
    pub size: u32,
    pub decimal_digits: u32,
    pub default_value: Option<String>,
    pub auto_increment: Option<String>,
}

/// One raw index metadata row: one participating column of one index.
#[derive(Debug, Clone)]
pub struct IndexRow {
    pub name: Option<String>,
    pub column_name: Option<String>,
    pub non_unique: bool,
    pub sequence_number: i32,
}

/// Yields schema metadata rows for a database.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Enumerate the table names in the given database.
    async fn table_names(&self, database: &str) -> Result<Vec<String>>;

    /// The column rows for a table, in declaration order.
    async fn column_rows(&self, database: &str, table: &str) -> Result<Vec<ColumnRow>>;

    /// The index rows for a table, one per (index, column) pair.
    async fn index_rows(&self, database: &str, table: &str) -> Result<Vec<IndexRow>>;
}

/// Convert a `"YES"`/`"NO"` flag text into a boolean.
pub fn flag_is_yes(flag: Option<&str>) -> bool {
    flag.is_some_and(|f| f.eq_ignore_ascii_case("YES"))
}

/// Reads all table definitions for one database from a metadata source.
pub struct MetaDataReader<'a, S: MetadataSource> {
    source: &'a S,
    database: String,
    key_pattern: String,
}

impl<'a, S: MetadataSource> MetaDataReader<'a, S> {
    /// Create a reader for the given database and surrogate-key pattern.
    pub fn new(source: &'a S, database: impl Into<String>, key_pattern: impl Into<String>) -> Self {
        Self {
            source,
            database: database.into(),
            key_pattern: key_pattern.into(),
        }
    }

    /// Read the definitions of all tables in the database.
    ///
    /// An unreachable source yields an empty list; a failure on an individual
    /// table is reported and extraction continues with whatever was already
    /// accumulated for it. The only hard error is an invalid surrogate-key
    /// pattern.
    pub async fn read_all(&self) -> Result<Vec<TableDefinition>> {
        let names = match self.source.table_names(&self.database).await {
            Ok(names) => names,
            Err(e) => {
                warn!(database = %self.database, error = %e, "failed to enumerate tables");
                return Ok(Vec::new());
            }
        };

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            tables.push(self.read_table(&name).await?);
        }
        Ok(tables)
    }

    async fn read_table(&self, name: &str) -> Result<TableDefinition> {
        let mut builder = TableBuilder::new(name, &self.key_pattern)?;

        match self.source.column_rows(&self.database, name).await {
            Ok(rows) => {
                for row in rows {
                    builder.add_column(ColumnDefinition::new(
                        row.name,
                        row.type_code,
                        flag_is_yes(row.nullable.as_deref()),
                        row.size,
                        row.decimal_digits,
                        row.default_value,
                        flag_is_yes(row.auto_increment.as_deref()),
                    ));
                }
                match self.source.index_rows(&self.database, name).await {
                    Ok(rows) => {
                        for row in rows {
                            builder.add_index(
                                row.name,
                                row.column_name,
                                row.non_unique,
                                row.sequence_number,
                            );
                        }
                    }
                    Err(e) => {
                        warn!(table = %name, error = %e, "failed to read index metadata, keeping partial definition");
                    }
                }
            }
            Err(e) => {
                warn!(table = %name, error = %e, "failed to read column metadata, keeping partial definition");
            }
        }

        Ok(builder.build())
    }
}
