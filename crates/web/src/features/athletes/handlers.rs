use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::athlete::{
    AthleteDetailResponse, AthleteListResponse, AthleteResponse, ProgressPoint,
    UpdateAthleteRequest,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes",
    responses(
        (status = 200, description = "Roster with race count and best 5K", body = Vec<AthleteListResponse>)
    ),
    tag = "athletes"
)]
pub async fn list_athletes(State(state): State<AppState>) -> Result<Response, WebError> {
    let athletes = services::list_athletes(state.store.as_ref()).await?;

    Ok(Json(athletes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete with results and personal records", body = AthleteDetailResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_athlete(
    State(state): State<AppState>,
    Path(athlete_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::get_athlete_detail(state.store.as_ref(), athlete_id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    put,
    path = "/api/athletes/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn update_athlete(
    State(state): State<AppState>,
    Path(athlete_id): Path<Uuid>,
    Json(update_req): Json<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_athlete(state.store.as_ref(), athlete_id, &update_req).await?;

    Ok(Json(AthleteResponse::from(updated)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{id}/progress/{distance}",
    params(
        ("id" = Uuid, Path, description = "Athlete id"),
        ("distance" = String, Path, description = "Race distance such as 5K, or `all`")
    ),
    responses(
        (status = 200, description = "Times in meet date order", body = Vec<ProgressPoint>),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_progress(
    State(state): State<AppState>,
    Path((athlete_id, distance)): Path<(Uuid, String)>,
) -> Result<Response, WebError> {
    let points = services::get_progress(state.store.as_ref(), athlete_id, &distance).await?;

    Ok(Json(points).into_response())
}
