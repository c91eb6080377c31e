//! Drives one conversion run: extract, convert, execute.
//!
//! The [`Migrator`] reads every table definition from the source, then for
//! each requested table drops the target table, executes the rendered
//! `CREATE TABLE` statement, and executes the index statements. Statement
//! failures are reported and the batch continues; nothing is retried.

use tracing::{info, warn};

use crate::config::Config;
use crate::convert::PostgresTableConverter;
use crate::error::Result;
use crate::model::TableDefinition;
use crate::source::{MetaDataReader, MetadataSource};
use crate::target::StatementSink;

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tables whose statements were generated and submitted.
    pub tables_processed: usize,
    /// Statements the sink accepted.
    pub statements_executed: usize,
    /// Statements the sink rejected (reported, not retried).
    pub statements_failed: usize,
}

/// Converts the schema of one database from source to target.
pub struct Migrator<'a, S: MetadataSource, K: StatementSink> {
    source: &'a S,
    sink: &'a K,
    config: &'a Config,
}

impl<'a, S: MetadataSource, K: StatementSink> Migrator<'a, S, K> {
    /// Create a migrator over a metadata source and a statement sink.
    pub fn new(source: &'a S, sink: &'a K, config: &'a Config) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    /// Run one conversion batch.
    pub async fn run(&self) -> Result<RunSummary> {
        let reader =
            MetaDataReader::new(self.source, &self.config.database, &self.config.key_pattern);
        let tables = reader.read_all().await?;
        info!(count = tables.len(), "read table definitions from source");

        let mut summary = RunSummary::default();
        for table in &tables {
            let requested = self.config.tables.iter().any(|t| t == table.name());

            // Index-only runs leave existing tables alone.
            if self.config.drop_tables && !self.config.indexes_only {
                self.drop_table(table.name(), &mut summary).await;
            }
            if !requested {
                continue;
            }

            if !self.config.drop_tables && !self.config.indexes_only {
                self.drop_table(table.name(), &mut summary).await;
            }
            self.convert_table(table, &mut summary).await;
            summary.tables_processed += 1;
        }

        info!(
            tables = summary.tables_processed,
            executed = summary.statements_executed,
            failed = summary.statements_failed,
            "conversion run finished"
        );
        Ok(summary)
    }

    async fn convert_table(&self, table: &TableDefinition, summary: &mut RunSummary) {
        let converter = PostgresTableConverter::new(table);

        if !self.config.indexes_only {
            match converter.create_table_statement() {
                Ok(sql) => self.execute(&sql, summary).await,
                Err(e) => {
                    warn!(table = %table.name(), error = %e, "skipping table creation");
                    summary.statements_failed += 1;
                }
            }
        }
        if !self.config.tables_only {
            for sql in converter.index_statements() {
                self.execute(&sql, summary).await;
            }
        }
    }

    async fn drop_table(&self, name: &str, summary: &mut RunSummary) {
        self.execute(&format!("DROP TABLE IF EXISTS {}", name), summary)
            .await;
    }

    async fn execute(&self, sql: &str, summary: &mut RunSummary) {
        match self.sink.execute(sql).await {
            Ok(()) => summary.statements_executed += 1,
            Err(e) => {
                warn!(statement = %sql, error = %e, "statement rejected by target");
                summary.statements_failed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::source::{ColumnRow, IndexRow};
    use crate::typemap::SqlType;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedSource;

    #[async_trait]
    impl MetadataSource for FixedSource {
        async fn table_names(&self, _database: &str) -> Result<Vec<String>> {
            Ok(vec!["orders".into(), "customers".into()])
        }

        async fn column_rows(&self, _database: &str, table: &str) -> Result<Vec<ColumnRow>> {
            let prefix = &table[..1];
            Ok(vec![
                ColumnRow {
                    name: format!("{}_id", prefix),
                    type_code: SqlType::Integer.code(),
                    nullable: Some("NO".into()),
                    size: 0,
                    decimal_digits: 0,
                    default_value: None,
                    auto_increment: Some("YES".into()),
                },
                ColumnRow {
                    name: format!("{}_name", prefix),
                    type_code: SqlType::Varchar.code(),
                    nullable: Some("YES".into()),
                    size: 40,
                    decimal_digits: 0,
                    default_value: None,
                    auto_increment: Some("NO".into()),
                },
            ])
        }

        async fn index_rows(&self, _database: &str, table: &str) -> Result<Vec<IndexRow>> {
            Ok(vec![IndexRow {
                name: Some("PRIMARY".into()),
                column_name: Some(format!("{}_id", &table[..1])),
                non_unique: false,
                sequence_number: 1,
            }])
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        statements: Mutex<Vec<String>>,
        reject_containing: Option<String>,
    }

    #[async_trait]
    impl StatementSink for RecordingSink {
        async fn execute(&self, sql: &str) -> Result<()> {
            if let Some(ref needle) = self.reject_containing {
                if sql.contains(needle.as_str()) {
                    return Err(SchemaError::Config("rejected".into()));
                }
            }
            self.statements.lock().unwrap().push(sql.to_string());
            Ok(())
        }
    }

    fn config(tables: &[&str]) -> Config {
        Config {
            source_url: "mysql://localhost/db".into(),
            target_url: "host=localhost".into(),
            database: "db".into(),
            key_pattern: ".*_id".into(),
            drop_tables: false,
            tables_only: false,
            indexes_only: false,
            tables: tables.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_requested_table_is_dropped_created_and_indexed() {
        let source = FixedSource;
        let sink = RecordingSink::default();
        let config = config(&["orders"]);

        let summary = Migrator::new(&source, &sink, &config).run().await.unwrap();

        assert_eq!(
            *sink.statements.lock().unwrap(),
            vec![
                "DROP TABLE IF EXISTS orders",
                "CREATE TABLE orders(\no_id SERIAL,\no_name VARCHAR(40))\n",
                "ALTER TABLE orders ADD PRIMARY KEY (o_id)",
            ]
        );
        assert_eq!(summary.tables_processed, 1);
        assert_eq!(summary.statements_executed, 3);
        assert_eq!(summary.statements_failed, 0);
    }

    #[tokio::test]
    async fn test_unrequested_tables_are_skipped() {
        let source = FixedSource;
        let sink = RecordingSink::default();
        let config = config(&["customers"]);

        Migrator::new(&source, &sink, &config).run().await.unwrap();

        let statements = sink.statements.lock().unwrap();
        assert!(statements.iter().all(|s| s.contains("customers")));
    }

    #[tokio::test]
    async fn test_drop_tables_drops_everything() {
        let source = FixedSource;
        let sink = RecordingSink::default();
        let mut config = config(&["orders"]);
        config.drop_tables = true;

        Migrator::new(&source, &sink, &config).run().await.unwrap();

        let statements = sink.statements.lock().unwrap();
        assert!(statements.contains(&"DROP TABLE IF EXISTS customers".to_string()));
        // The requested table is dropped once, not twice.
        assert_eq!(
            statements
                .iter()
                .filter(|s| *s == "DROP TABLE IF EXISTS orders")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_tables_only_skips_index_statements() {
        let source = FixedSource;
        let sink = RecordingSink::default();
        let mut config = config(&["orders"]);
        config.tables_only = true;

        Migrator::new(&source, &sink, &config).run().await.unwrap();

        let statements = sink.statements.lock().unwrap();
        assert!(statements.iter().all(|s| !s.contains("PRIMARY KEY")));
        assert!(statements.iter().any(|s| s.starts_with("CREATE TABLE")));
    }

    #[tokio::test]
    async fn test_indexes_only_neither_drops_nor_creates_tables() {
        let source = FixedSource;
        let sink = RecordingSink::default();
        let mut config = config(&["orders"]);
        config.indexes_only = true;

        Migrator::new(&source, &sink, &config).run().await.unwrap();

        assert_eq!(
            *sink.statements.lock().unwrap(),
            vec!["ALTER TABLE orders ADD PRIMARY KEY (o_id)"]
        );
    }

    #[tokio::test]
    async fn test_rejected_statement_does_not_stop_the_batch() {
        let source = FixedSource;
        let sink = RecordingSink {
            reject_containing: Some("CREATE TABLE".into()),
            ..RecordingSink::default()
        };
        let config = config(&["orders", "customers"]);

        let summary = Migrator::new(&source, &sink, &config).run().await.unwrap();

        assert_eq!(summary.statements_failed, 2);
        // Drops and index statements still went through for both tables.
        assert_eq!(summary.statements_executed, 4);
        assert_eq!(summary.tables_processed, 2);
    }
}
