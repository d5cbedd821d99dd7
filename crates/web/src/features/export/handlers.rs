use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

fn csv_attachment(prefix: &str, body: Vec<u8>) -> Response {
    let filename = format!("{}_{}.csv", prefix, chrono::Utc::now().format("%Y%m%d"));
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/export/csv",
    responses(
        (status = 200, description = "One line per result", content_type = "text/csv", body = String)
    ),
    tag = "export"
)]
pub async fn export_results(State(state): State<AppState>) -> Result<Response, WebError> {
    let body = services::results_csv(state.store.as_ref()).await?;

    Ok(csv_attachment("xc_results", body))
}

#[utoipa::path(
    get,
    path = "/api/export/csv/by-meet",
    responses(
        (status = 200, description = "One line per athlete with a time and pace column pair per meet", content_type = "text/csv", body = String)
    ),
    tag = "export"
)]
pub async fn export_by_meet(State(state): State<AppState>) -> Result<Response, WebError> {
    let body = services::meet_matrix_csv(state.store.as_ref()).await?;

    Ok(csv_attachment("xc_results_by_meet", body))
}
