use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::store::{NewAthlete, NewMeet, NewResult, NewVenue, RaceKey, RaceWriter};

/// [`RaceWriter`] over one PostgreSQL transaction.
pub struct PgRaceWriter {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgRaceWriter {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx: Some(tx) }
    }

    fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>> {
        self.tx.as_mut().ok_or(StorageError::TransactionClosed)
    }
}

#[async_trait]
impl RaceWriter for PgRaceWriter {
    async fn find_or_create_venue(&mut self, venue: &NewVenue) -> Result<Uuid> {
        let tx = self.tx()?;

        let existing =
            sqlx::query_scalar::<_, Uuid>("SELECT venue_id FROM venues WHERE name = $1")
                .bind(&venue.name)
                .fetch_optional(&mut **tx)
                .await?;

        if let Some(id) = existing {
            return Ok(id);
        }

        let venue_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO venues (name, location, state)
            VALUES ($1, $2, $3)
            RETURNING venue_id
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.location)
        .bind(&venue.state)
        .fetch_one(&mut **tx)
        .await?;

        tracing::debug!("Created venue '{}'", venue.name);
        Ok(venue_id)
    }

    async fn find_or_create_meet(&mut self, meet: &NewMeet) -> Result<Uuid> {
        let tx = self.tx()?;

        let meet_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO meets (name, meet_date, season, source_url, venue_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name, meet_date)
            DO UPDATE SET
                season = EXCLUDED.season,
                venue_id = EXCLUDED.venue_id,
                source_url = COALESCE(EXCLUDED.source_url, meets.source_url)
            RETURNING meet_id
            "#,
        )
        .bind(&meet.name)
        .bind(meet.meet_date)
        .bind(&meet.season)
        .bind(&meet.source_url)
        .bind(meet.venue_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(meet_id)
    }

    async fn find_or_create_race(&mut self, race: &RaceKey) -> Result<Uuid> {
        let tx = self.tx()?;

        let race_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO races (meet_id, distance, race_class, gender)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (meet_id, distance, race_class, gender)
            DO UPDATE SET distance = EXCLUDED.distance
            RETURNING race_id
            "#,
        )
        .bind(race.meet_id)
        .bind(&race.distance)
        .bind(&race.race_class)
        .bind(race.gender.as_str())
        .fetch_one(&mut **tx)
        .await?;

        Ok(race_id)
    }

    async fn find_or_create_athlete(&mut self, athlete: &NewAthlete) -> Result<Uuid> {
        let tx = self.tx()?;
        let (first_name, last_name) = athlete.name.as_database_tuple();

        let existing = sqlx::query_as::<_, (Uuid, Option<String>)>(
            r#"
            SELECT athlete_id, school FROM athletes
            WHERE first_name = $1 AND last_name = $2 AND gender = $3
              AND ($4::text IS NULL OR school IS NULL OR school = $4)
            ORDER BY (school = $4) DESC NULLS LAST, created_at
            LIMIT 1
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(athlete.gender.as_str())
        .bind(&athlete.school)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some((id, school)) = existing {
            if school.is_none() && athlete.school.is_some() {
                sqlx::query("UPDATE athletes SET school = $2 WHERE athlete_id = $1")
                    .bind(id)
                    .bind(&athlete.school)
                    .execute(&mut **tx)
                    .await?;
            }
            return Ok(id);
        }

        let athlete_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO athletes (first_name, last_name, gender, school)
            VALUES ($1, $2, $3, $4)
            RETURNING athlete_id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(athlete.gender.as_str())
        .bind(&athlete.school)
        .fetch_one(&mut **tx)
        .await?;

        tracing::debug!("Created athlete {} {}", first_name, last_name);
        Ok(athlete_id)
    }

    async fn result_exists(&mut self, race_id: Uuid, athlete_id: Uuid) -> Result<bool> {
        let tx = self.tx()?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM results WHERE race_id = $1 AND athlete_id = $2)",
        )
        .bind(race_id)
        .bind(athlete_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(exists)
    }

    async fn insert_result(&mut self, result: &NewResult) -> Result<Uuid> {
        let tx = self.tx()?;

        let result_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO results (race_id, athlete_id, time_seconds, place, varsity_points)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING result_id
            "#,
        )
        .bind(result.race_id)
        .bind(result.athlete_id)
        .bind(result.time_seconds)
        .bind(result.place)
        .bind(result.varsity_points)
        .fetch_one(&mut **tx)
        .await?;

        Ok(result_id)
    }

    async fn commit(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or(StorageError::TransactionClosed)?;
        tx.commit().await?;
        Ok(())
    }
}
