use axum::{Router, routing::get};

use super::handlers::{export_by_meet, export_results};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/csv", get(export_results))
        .route("/csv/by-meet", get(export_by_meet))
}
