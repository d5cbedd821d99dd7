use axum::{Router, routing::get};

use super::handlers::{list_prs, team_stats};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/prs", get(list_prs))
        .route("/team/stats", get(team_stats))
}
