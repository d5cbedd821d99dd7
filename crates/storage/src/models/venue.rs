use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Venue {
    pub venue_id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub state: Option<String>,
}
