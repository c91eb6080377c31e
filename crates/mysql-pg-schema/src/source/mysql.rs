//! MySQL/MariaDB metadata source implementation.
//!
//! Reads table, column, and index metadata from `INFORMATION_SCHEMA` using
//! SQLx. String columns are CAST to CHAR to sidestep collation differences,
//! and MySQL `DATA_TYPE` names are mapped to the standard SQL type taxonomy.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::warn;

use crate::error::Result;
use crate::source::{ColumnRow, IndexRow, MetadataSource};
use crate::typemap::{SqlType, OTHER_TYPE_CODE};

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// MySQL/MariaDB metadata source.
pub struct MysqlSource {
    pool: MySqlPool,
}

impl MysqlSource {
    /// Create a source for the given connection URL.
    ///
    /// The pool connects lazily: an unreachable server surfaces as a
    /// per-query metadata-access failure, which extraction treats as an
    /// empty result set.
    pub fn connect(url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_lazy(url)?;
        Ok(Self { pool })
    }

    /// Test the database connection.
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MetadataSource for MysqlSource {
    async fn table_names(&self, database: &str) -> Result<Vec<String>> {
        let query = r#"
            SELECT CAST(TABLE_NAME AS CHAR(255)) AS TABLE_NAME
            FROM INFORMATION_SCHEMA.TABLES
            WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
        "#;

        let rows: Vec<MySqlRow> = sqlx::query(query)
            .bind(database)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| row.get::<String, _>("TABLE_NAME"))
            .collect())
    }

    async fn column_rows(&self, database: &str, table: &str) -> Result<Vec<ColumnRow>> {
        // COLUMN_SIZE follows driver metadata conventions: character length
        // for string types, numeric precision otherwise. Lengths beyond the
        // i32 range (LONGTEXT etc) are reported as 0; size is only rendered
        // for CHAR/VARCHAR/DECIMAL anyway.
        let query = r#"
            SELECT
                CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
                CAST(DATA_TYPE AS CHAR(255)) AS DATA_TYPE,
                CAST(CASE
                    WHEN CHARACTER_MAXIMUM_LENGTH IS NULL THEN COALESCE(NUMERIC_PRECISION, 0)
                    WHEN CHARACTER_MAXIMUM_LENGTH > 2147483647 THEN 0
                    ELSE CHARACTER_MAXIMUM_LENGTH
                END AS SIGNED) AS COLUMN_SIZE,
                CAST(COALESCE(NUMERIC_SCALE, 0) AS SIGNED) AS DECIMAL_DIGITS,
                CAST(IS_NULLABLE AS CHAR(3)) AS IS_NULLABLE,
                CAST(COLUMN_DEFAULT AS CHAR(255)) AS COLUMN_DEFAULT,
                IF(EXTRA LIKE '%auto_increment%', 'YES', 'NO') AS IS_AUTOINCREMENT
            FROM INFORMATION_SCHEMA.COLUMNS
            WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;

        let rows: Vec<MySqlRow> = sqlx::query(query)
            .bind(database)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let data_type = row.get::<String, _>("DATA_TYPE");
                let type_code = match SqlType::from_mysql_name(&data_type) {
                    Some(ty) => ty.code(),
                    None => {
                        warn!(table = %table, data_type = %data_type, "MySQL type has no taxonomy member");
                        OTHER_TYPE_CODE
                    }
                };
                ColumnRow {
                    name: row.get::<String, _>("COLUMN_NAME"),
                    type_code,
                    nullable: row.get::<Option<String>, _>("IS_NULLABLE"),
                    size: row.get::<i64, _>("COLUMN_SIZE").max(0) as u32,
                    decimal_digits: row.get::<i64, _>("DECIMAL_DIGITS").max(0) as u32,
                    default_value: row.get::<Option<String>, _>("COLUMN_DEFAULT"),
                    auto_increment: row.get::<Option<String>, _>("IS_AUTOINCREMENT"),
                }
            })
            .collect())
    }

    async fn index_rows(&self, database: &str, table: &str) -> Result<Vec<IndexRow>> {
        let query = r#"
            SELECT
                CAST(INDEX_NAME AS CHAR(255)) AS INDEX_NAME,
                CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
                CAST(NON_UNIQUE AS SIGNED) AS NON_UNIQUE,
                CAST(SEQ_IN_INDEX AS SIGNED) AS SEQ_IN_INDEX
            FROM INFORMATION_SCHEMA.STATISTICS
            WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
            ORDER BY INDEX_NAME, SEQ_IN_INDEX
        "#;

        let rows: Vec<MySqlRow> = sqlx::query(query)
            .bind(database)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| IndexRow {
                name: row.get::<Option<String>, _>("INDEX_NAME"),
                column_name: row.get::<Option<String>, _>("COLUMN_NAME"),
                non_unique: row.get::<i64, _>("NON_UNIQUE") != 0,
                sequence_number: row.get::<i64, _>("SEQ_IN_INDEX") as i32,
            })
            .collect())
    }
}
