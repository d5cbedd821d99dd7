use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::distance::calculate_pace;
use crate::dto::report::AthletePrResponse;
use crate::time::{format_seconds, format_time};

/// Response containing basic athlete information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub athlete_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub school: Option<String>,
    pub graduation_year: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Roster row: one athlete with race count and best 5K
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AthleteListEntry {
    pub athlete_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub school: Option<String>,
    pub graduation_year: Option<i32>,
    pub race_count: i64,
    pub best_5k_seconds: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteListResponse {
    #[serde(flatten)]
    pub entry: AthleteListEntry,
    pub best_5k: Option<String>,
}

/// One result of an athlete joined with its race, meet and venue
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AthleteResultRow {
    pub result_id: Uuid,
    pub meet_name: String,
    pub meet_date: NaiveDate,
    pub venue_name: Option<String>,
    pub distance: String,
    pub race_class: String,
    pub time_seconds: Decimal,
    pub place: Option<i32>,
    pub varsity_points: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResultResponse {
    #[serde(flatten)]
    pub row: AthleteResultRow,
    pub time: String,
    pub pace: Option<String>,
}

/// Detailed athlete response with result history and PRs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteDetailResponse {
    pub athlete: AthleteResponse,
    pub results: Vec<AthleteResultResponse>,
    pub personal_records: Vec<AthletePrResponse>,
    pub varsity_races: usize,
}

/// A point on an athlete's progress chart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub meet: String,
    pub distance: String,
    pub time: Decimal,
    pub formatted_time: String,
    pub pace: Option<String>,
    pub pace_seconds: Option<f64>,
    pub five_k_time: Option<Decimal>,
    pub formatted_five_k_time: Option<String>,
}

/// Request payload for updating an existing athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[validate(range(
        min = 1990,
        max = 2100,
        message = "Graduation year must be between 1990 and 2100"
    ))]
    pub graduation_year: Option<i32>,
}

impl From<crate::models::Athlete> for AthleteResponse {
    fn from(athlete: crate::models::Athlete) -> Self {
        Self {
            athlete_id: athlete.athlete_id,
            first_name: athlete.first_name,
            last_name: athlete.last_name,
            gender: athlete.gender,
            school: athlete.school,
            graduation_year: athlete.graduation_year,
            created_at: athlete.created_at,
        }
    }
}

impl From<AthleteListEntry> for AthleteListResponse {
    fn from(entry: AthleteListEntry) -> Self {
        Self {
            best_5k: format_time(entry.best_5k_seconds),
            entry,
        }
    }
}

impl From<AthleteResultRow> for AthleteResultResponse {
    fn from(row: AthleteResultRow) -> Self {
        Self {
            time: format_seconds(row.time_seconds),
            pace: calculate_pace(row.time_seconds, &row.distance),
            row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_graduation_year_range() {
        let ok = UpdateAthleteRequest {
            graduation_year: Some(2027),
        };
        assert!(ok.validate().is_ok());

        let cleared = UpdateAthleteRequest {
            graduation_year: None,
        };
        assert!(cleared.validate().is_ok());

        let bad = UpdateAthleteRequest {
            graduation_year: Some(27),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_result_response_formats_time_and_pace() {
        let row = AthleteResultRow {
            result_id: Uuid::new_v4(),
            meet_name: "Liberty Bell".to_string(),
            meet_date: NaiveDate::from_ymd_opt(2024, 9, 7).unwrap(),
            venue_name: None,
            distance: "2M".to_string(),
            race_class: "jv".to_string(),
            time_seconds: Decimal::from(720),
            place: Some(4),
            varsity_points: Some(0),
        };
        let response = AthleteResultResponse::from(row);
        assert_eq!(response.time, "12:00.00");
        assert_eq!(response.pace.as_deref(), Some("06:00.00"));
    }
}
