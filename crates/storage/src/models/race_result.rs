use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One athlete's finish in one race. At most one exists per (race, athlete).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RaceResult {
    pub result_id: Uuid,
    pub race_id: Uuid,
    pub athlete_id: Uuid,
    pub time_seconds: Decimal,
    pub place: Option<i32>,
    pub varsity_points: Option<i32>,
}
