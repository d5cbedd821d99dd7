use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::Gender;
use crate::time::format_seconds;

/// Row of the `athlete_prs` view: best time per (athlete, distance)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AthletePr {
    pub athlete_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub school: Option<String>,
    pub distance: String,
    pub best_time_seconds: Decimal,
    pub race_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthletePrResponse {
    #[serde(flatten)]
    pub pr: AthletePr,
    pub best_time: String,
}

/// Row of the `team_stats` view, grouped by (gender, distance, race_class)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamStat {
    pub gender: String,
    pub distance: String,
    pub race_class: String,
    pub athlete_count: i64,
    pub best_time_seconds: Decimal,
    pub avg_time_seconds: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamStatResponse {
    #[serde(flatten)]
    pub stat: TeamStat,
    pub best_time: String,
    pub avg_time: String,
}

/// One result joined to its athlete, race and meet
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExportRow {
    pub athlete_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub meet_id: Uuid,
    pub meet_name: String,
    pub meet_date: NaiveDate,
    pub race_class: String,
    pub distance: String,
    pub time_seconds: Decimal,
    pub place: Option<i32>,
}

/// Optional filters on the `athlete_prs` view
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrFilter {
    pub athlete_id: Option<Uuid>,
    pub gender: Option<Gender>,
    pub distance: Option<String>,
}

impl PrFilter {
    pub fn for_athlete(athlete_id: Uuid) -> Self {
        Self {
            athlete_id: Some(athlete_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, pr: &AthletePr) -> bool {
        self.athlete_id.is_none_or(|id| id == pr.athlete_id)
            && self.gender.is_none_or(|g| g.as_str() == pr.gender)
            && self
                .distance
                .as_deref()
                .is_none_or(|d| d.eq_ignore_ascii_case(&pr.distance))
    }
}

impl From<AthletePr> for AthletePrResponse {
    fn from(pr: AthletePr) -> Self {
        Self {
            best_time: format_seconds(pr.best_time_seconds),
            pr,
        }
    }
}

impl From<TeamStat> for TeamStatResponse {
    fn from(stat: TeamStat) -> Self {
        Self {
            best_time: format_seconds(stat.best_time_seconds),
            avg_time: format_seconds(stat.avg_time_seconds),
            stat,
        }
    }
}
