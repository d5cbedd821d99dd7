use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;
mod state;

use config::Config;
use features::{athletes, dashboard, export, reports};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        dashboard::handlers::get_summary,
        athletes::handlers::list_athletes,
        athletes::handlers::get_athlete,
        athletes::handlers::update_athlete,
        athletes::handlers::get_progress,
        reports::handlers::list_prs,
        reports::handlers::team_stats,
        export::handlers::export_results,
        export::handlers::export_by_meet,
    ),
    components(
        schemas(
            storage::dto::summary::DashboardSummary,
            storage::dto::summary::TeamTotals,
            storage::dto::summary::RecentMeet,
            storage::dto::athlete::AthleteResponse,
            storage::dto::athlete::AthleteListEntry,
            storage::dto::athlete::AthleteListResponse,
            storage::dto::athlete::AthleteResultRow,
            storage::dto::athlete::AthleteResultResponse,
            storage::dto::athlete::AthleteDetailResponse,
            storage::dto::athlete::ProgressPoint,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::report::AthletePr,
            storage::dto::report::AthletePrResponse,
            storage::dto::report::TeamStat,
            storage::dto::report::TeamStatResponse,
            storage::models::Gender,
        )
    ),
    tags(
        (name = "dashboard", description = "Team totals and recent meets"),
        (name = "athletes", description = "Roster, athlete history and progress"),
        (name = "reports", description = "Personal records and team statistics"),
        (name = "export", description = "CSV downloads"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting cross-country stats API");

    let config = Config::from_env().context("Failed to load API configuration")?;

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    if let Some(ref school) = config.team_school {
        tracing::info!("Reporting on athletes of {}", school);
    }
    let state = AppState::new(Arc::new(db.store().with_school(config.team_school.clone())));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let bind_address = config.bind_address();
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
