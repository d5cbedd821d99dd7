use storage::{
    Store,
    dto::report::{AthletePrResponse, PrFilter, TeamStatResponse},
    error::Result,
};

/// Rows of the personal-record view matching the filter
pub async fn list_prs(store: &dyn Store, filter: &PrFilter) -> Result<Vec<AthletePrResponse>> {
    let prs = store.athlete_prs(filter).await?;
    Ok(prs.into_iter().map(AthletePrResponse::from).collect())
}

pub async fn team_stats(store: &dyn Store) -> Result<Vec<TeamStatResponse>> {
    let stats = store.team_stats().await?;
    Ok(stats.into_iter().map(TeamStatResponse::from).collect())
}
