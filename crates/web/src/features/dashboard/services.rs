use storage::{Store, dto::summary::DashboardSummary, error::Result};

pub async fn get_summary(store: &dyn Store) -> Result<DashboardSummary> {
    store.dashboard_summary().await
}
