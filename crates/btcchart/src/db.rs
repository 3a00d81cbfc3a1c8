// File: crates/btcchart/src/db.rs
// Summary: Price log access over a Postgres pool.

use anyhow::{anyhow, Context, Result};
use log::info;
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres};

/// One quote row from the `btclog` table.
#[derive(Debug, Clone, FromRow)]
pub struct PriceLog {
    pub timestamp: i64,
    pub last: f64,
    pub bid: f64,
    pub ask: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PriceStore {
    pool: Pool<Postgres>,
}

impl PriceStore {
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Attempting to connect to Postgres DB");
        let pool = Pool::<Postgres>::connect(url)
            .await
            .map(|pool: Pool<Postgres>| {
                info!("Successfully connected to Postgres DB");
                pool
            })
            .map_err(|e| anyhow!("DB connection error: {}", e))?;
        Ok(Self { pool })
    }

    /// The newest `limit` quotes, most recent first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<PriceLog>> {
        sqlx::query_as::<_, PriceLog>(
            "SELECT timestamp, last, bid, ask, created_at FROM btclog ORDER BY timestamp DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("fetching price rows")
    }
}
