use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::dto::report::{AthletePrResponse, PrFilter, TeamStatResponse};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/prs",
    params(PrFilter),
    responses(
        (status = 200, description = "Best time per athlete and distance", body = Vec<AthletePrResponse>)
    ),
    tag = "reports"
)]
pub async fn list_prs(
    State(state): State<AppState>,
    Query(filter): Query<PrFilter>,
) -> Result<Response, WebError> {
    let prs = services::list_prs(state.store.as_ref(), &filter).await?;

    Ok(Json(prs).into_response())
}

#[utoipa::path(
    get,
    path = "/api/team/stats",
    responses(
        (status = 200, description = "Athlete count, best and average time per gender, distance and race class", body = Vec<TeamStatResponse>)
    ),
    tag = "reports"
)]
pub async fn team_stats(State(state): State<AppState>) -> Result<Response, WebError> {
    let stats = services::team_stats(state.store.as_ref()).await?;

    Ok(Json(stats).into_response())
}
