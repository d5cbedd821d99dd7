use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Totals shown on the dashboard landing page
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamTotals {
    pub total_athletes: i64,
    pub total_meets: i64,
    pub total_races: i64,
    pub total_results: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecentMeet {
    pub name: String,
    pub meet_date: NaiveDate,
    pub venue_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub totals: TeamTotals,
    pub recent_meets: Vec<RecentMeet>,
}
