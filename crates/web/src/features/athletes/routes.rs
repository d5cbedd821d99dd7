use axum::{Router, routing::get};

use super::handlers::{get_athlete, get_progress, list_athletes, update_athlete};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_athletes))
        .route("/:id", get(get_athlete).put(update_athlete))
        .route("/:id/progress/:distance", get(get_progress))
}
