//! Statement execution against the target database.
//!
//! A [`StatementSink`] accepts rendered SQL strings one at a time.
//! Execution is best-effort: callers report failures and continue with the
//! next statement.

mod postgres;

pub use postgres::PgExecutor;

use async_trait::async_trait;

use crate::error::Result;

/// Executes rendered SQL statements, one at a time, in the order given.
#[async_trait]
pub trait StatementSink: Send + Sync {
    /// Execute one SQL statement.
    async fn execute(&self, sql: &str) -> Result<()>;
}
