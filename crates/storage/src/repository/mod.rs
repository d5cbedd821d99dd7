//! PostgreSQL implementation of the store traits.

pub mod athlete;
mod report;
mod writer;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub use writer::PgRaceWriter;

use crate::dto::athlete::UpdateAthleteRequest;
use crate::error::Result;
use crate::models::Athlete;
use crate::store::{RaceWriter, ResultStore};
use athlete::AthleteRepository;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    school: Option<String>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, school: None }
    }

    /// Limits reporting queries to athletes of one school. Writes are unaffected.
    pub fn with_school(&self, school: Option<String>) -> Self {
        Self {
            pool: self.pool.clone(),
            school,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn school(&self) -> Option<&str> {
        self.school.as_deref()
    }
}

#[async_trait]
impl ResultStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn RaceWriter>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgRaceWriter::new(tx)))
    }

    async fn clear_all(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // Children before parents.
        for table in ["results", "races", "meets", "venues", "athletes"] {
            let deleted = sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?
                .rows_affected();
            tracing::debug!("Deleted {} row(s) from {}", deleted, table);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn count_results(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM results")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update_athlete(
        &self,
        athlete_id: Uuid,
        req: &UpdateAthleteRequest,
    ) -> Result<Athlete> {
        AthleteRepository::new(&self.pool).update(athlete_id, req).await
    }
}
