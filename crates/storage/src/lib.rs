pub mod distance;
pub mod dto;
pub mod error;
pub mod export;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;
pub mod time;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use error::{Result, StorageError};
pub use memory::MemoryStore;
pub use repository::PgStore;
pub use store::{RaceWriter, ReportingStore, ResultStore, Store};

/// Connection pool plus the embedded schema migrations.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates tables, views and the `format_time` function if missing.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone())
    }
}
