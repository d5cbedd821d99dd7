use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Meet {
    pub meet_id: Uuid,
    pub name: String,
    pub meet_date: chrono::NaiveDate,
    pub season: String,
    pub source_url: Option<String>,
    pub venue_id: Option<Uuid>,
}
