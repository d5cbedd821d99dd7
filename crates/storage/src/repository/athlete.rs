use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::athlete::{AthleteListEntry, AthleteResultRow, UpdateAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::Athlete;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
    school: Option<&'a str>,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool, school: None }
    }

    /// Restricts `list` and `find_by_id` to athletes of `school`.
    pub fn scoped(pool: &'a PgPool, school: Option<&'a str>) -> Self {
        Self { pool, school }
    }

    /// List all athletes with race count and best 5K
    pub async fn list(&self) -> Result<Vec<AthleteListEntry>> {
        let athletes = sqlx::query_as::<_, AthleteListEntry>(
            r#"
            SELECT
                a.athlete_id,
                a.first_name,
                a.last_name,
                a.gender,
                a.school,
                a.graduation_year,
                COUNT(res.result_id) AS race_count,
                MIN(CASE WHEN UPPER(r.distance) = '5K' THEN res.time_seconds END) AS best_5k_seconds
            FROM athletes a
            LEFT JOIN results res ON res.athlete_id = a.athlete_id
            LEFT JOIN races r ON r.race_id = res.race_id
            WHERE $1::text IS NULL OR a.school = $1
            GROUP BY a.athlete_id, a.first_name, a.last_name, a.gender, a.school,
                     a.graduation_year
            ORDER BY a.last_name, a.first_name
            "#,
        )
        .bind(self.school)
        .fetch_all(self.pool)
        .await?;

        Ok(athletes)
    }

    /// Find athlete by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT athlete_id, first_name, last_name, gender, school, graduation_year, created_at
            FROM athletes
            WHERE athlete_id = $1 AND ($2::text IS NULL OR school = $2)
            "#,
        )
        .bind(id)
        .bind(self.school)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Results of one athlete, newest first
    pub async fn results(&self, id: Uuid) -> Result<Vec<AthleteResultRow>> {
        let rows = sqlx::query_as::<_, AthleteResultRow>(
            r#"
            SELECT
                res.result_id,
                m.name AS meet_name,
                m.meet_date,
                v.name AS venue_name,
                r.distance,
                r.race_class,
                res.time_seconds,
                res.place,
                res.varsity_points
            FROM results res
            JOIN races r ON r.race_id = res.race_id
            JOIN meets m ON m.meet_id = r.meet_id
            LEFT JOIN venues v ON v.venue_id = m.venue_id
            WHERE res.athlete_id = $1
            ORDER BY m.meet_date DESC, m.name, res.time_seconds
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Update the mutable fields of an athlete
    pub async fn update(&self, id: Uuid, req: &UpdateAthleteRequest) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(
            r#"
            UPDATE athletes
            SET graduation_year = $2
            WHERE athlete_id = $1
            RETURNING athlete_id, first_name, last_name, gender, school, graduation_year,
                      created_at
            "#,
        )
        .bind(id)
        .bind(req.graduation_year)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }
}
