//! PostgreSQL statement executor.
//!
//! A single tokio-postgres connection; schema creation is sequential, one
//! statement at a time, so no pooling is involved.

use async_trait::async_trait;
use tokio_postgres::NoTls;
use tracing::{info, warn};

use crate::error::Result;
use crate::target::StatementSink;

/// PostgreSQL statement executor.
pub struct PgExecutor {
    client: tokio_postgres::Client,
}

impl PgExecutor {
    /// Connect to the target database.
    ///
    /// Accepts a tokio-postgres connection string
    /// (`host=... user=... dbname=...` or a `postgres://` URL).
    pub async fn connect(url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

        // The connection object performs the actual communication.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "postgres connection closed with error");
            }
        });

        client.simple_query("SELECT 1").await?;
        info!("connected to PostgreSQL target");

        Ok(Self { client })
    }
}

#[async_trait]
impl StatementSink for PgExecutor {
    async fn execute(&self, sql: &str) -> Result<()> {
        self.client.batch_execute(sql).await?;
        Ok(())
    }
}
