use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::summary::DashboardSummary;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/summary",
    responses(
        (status = 200, description = "Team totals and the most recent meets", body = DashboardSummary)
    ),
    tag = "dashboard"
)]
pub async fn get_summary(State(state): State<AppState>) -> Result<Response, WebError> {
    let summary = services::get_summary(state.store.as_ref()).await?;

    Ok(Json(summary).into_response())
}
