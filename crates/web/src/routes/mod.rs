use axum::Router;

use crate::features::{athletes, dashboard, export, reports};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/summary", dashboard::routes::routes())
        .nest("/athletes", athletes::routes::routes())
        .nest("/export", export::routes::routes())
        .merge(reports::routes::routes());

    Router::new().nest("/api", api).with_state(state)
}
