use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use super::PgStore;
use super::athlete::AthleteRepository;
use crate::dto::athlete::{AthleteListEntry, AthleteResultRow};
use crate::dto::report::{AthletePr, ExportRow, PrFilter, TeamStat};
use crate::dto::summary::{DashboardSummary, RecentMeet, TeamTotals};
use crate::error::Result;
use crate::models::Athlete;
use crate::store::ReportingStore;

const RECENT_MEETS: i64 = 5;

#[async_trait]
impl ReportingStore for PgStore {
    async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let totals = sqlx::query_as::<_, TeamTotals>(
            r#"
            WITH scoped AS (
                SELECT res.result_id, res.race_id, r.meet_id
                FROM results res
                JOIN races r ON r.race_id = res.race_id
                JOIN athletes a ON a.athlete_id = res.athlete_id
                WHERE $1::text IS NULL OR a.school = $1
            )
            SELECT
                (SELECT COUNT(*) FROM athletes
                 WHERE $1::text IS NULL OR school = $1) AS total_athletes,
                CASE WHEN $1::text IS NULL THEN (SELECT COUNT(*) FROM meets)
                     ELSE (SELECT COUNT(DISTINCT meet_id) FROM scoped) END AS total_meets,
                CASE WHEN $1::text IS NULL THEN (SELECT COUNT(*) FROM races)
                     ELSE (SELECT COUNT(DISTINCT race_id) FROM scoped) END AS total_races,
                (SELECT COUNT(*) FROM scoped) AS total_results
            "#,
        )
        .bind(&self.school)
        .fetch_one(&self.pool)
        .await?;

        let recent_meets = sqlx::query_as::<_, RecentMeet>(
            r#"
            SELECT m.name, m.meet_date, v.name AS venue_name
            FROM meets m
            LEFT JOIN venues v ON v.venue_id = m.venue_id
            WHERE $2::text IS NULL OR EXISTS (
                SELECT 1
                FROM races r
                JOIN results res ON res.race_id = r.race_id
                JOIN athletes a ON a.athlete_id = res.athlete_id
                WHERE r.meet_id = m.meet_id AND a.school = $2
            )
            ORDER BY m.meet_date DESC, m.name
            LIMIT $1
            "#,
        )
        .bind(RECENT_MEETS)
        .bind(&self.school)
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardSummary {
            totals,
            recent_meets,
        })
    }

    async fn list_athletes(&self) -> Result<Vec<AthleteListEntry>> {
        AthleteRepository::scoped(&self.pool, self.school())
            .list().await
    }

    async fn find_athlete(&self, athlete_id: Uuid) -> Result<Athlete> {
        AthleteRepository::scoped(&self.pool, self.school())
            .find_by_id(athlete_id).await
    }

    async fn athlete_results(&self, athlete_id: Uuid) -> Result<Vec<AthleteResultRow>> {
        AthleteRepository::new(&self.pool).results(athlete_id).await
    }

    async fn athlete_prs(&self, filter: &PrFilter) -> Result<Vec<AthletePr>> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT athlete_id, first_name, last_name, gender, school, distance,
                   best_time_seconds, race_count
            FROM athlete_prs
            WHERE 1=1
            "#,
        );

        if let Some(ref school) = self.school {
            query.push(" AND school = ");
            query.push_bind(school.clone());
        }

        if let Some(athlete_id) = filter.athlete_id {
            query.push(" AND athlete_id = ");
            query.push_bind(athlete_id);
        }

        if let Some(gender) = filter.gender {
            query.push(" AND gender = ");
            query.push_bind(gender.as_str());
        }

        if let Some(ref distance) = filter.distance {
            query.push(" AND UPPER(distance) = UPPER(");
            query.push_bind(distance.clone());
            query.push(")");
        }

        query.push(" ORDER BY gender, distance, best_time_seconds, last_name, first_name");

        let prs: Vec<AthletePr> = query.build_query_as().fetch_all(&self.pool).await?;
        Ok(prs)
    }

    async fn team_stats(&self) -> Result<Vec<TeamStat>> {
        let stats = match self.school {
            None => {
                sqlx::query_as::<_, TeamStat>(
                    r#"
                    SELECT gender, distance, race_class, athlete_count,
                           best_time_seconds, avg_time_seconds
                    FROM team_stats
                    ORDER BY gender, distance, race_class
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            Some(ref school) => {
                sqlx::query_as::<_, TeamStat>(
                    r#"
                    SELECT gender, distance, race_class, athlete_count,
                           best_time_seconds, avg_time_seconds
                    FROM team_stats_by_school
                    WHERE school = $1
                    ORDER BY gender, distance, race_class
                    "#,
                )
                .bind(school)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(stats)
    }

    async fn export_rows(&self) -> Result<Vec<ExportRow>> {
        let rows = sqlx::query_as::<_, ExportRow>(
            r#"
            SELECT
                a.athlete_id,
                a.first_name,
                a.last_name,
                a.gender,
                m.meet_id,
                m.name AS meet_name,
                m.meet_date,
                r.race_class,
                r.distance,
                res.time_seconds,
                res.place
            FROM results res
            JOIN athletes a ON a.athlete_id = res.athlete_id
            JOIN races r ON r.race_id = res.race_id
            JOIN meets m ON m.meet_id = r.meet_id
            WHERE $1::text IS NULL OR a.school = $1
            ORDER BY m.meet_date, m.name, r.distance, r.race_class,
                     res.place NULLS LAST, res.time_seconds
            "#,
        )
        .bind(&self.school)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
