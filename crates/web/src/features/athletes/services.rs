use storage::{
    Store,
    distance::{calculate_pace, five_k_equivalent, pace_seconds},
    dto::{
        athlete::{
            AthleteDetailResponse, AthleteListResponse, AthleteResponse, AthleteResultResponse,
            ProgressPoint, UpdateAthleteRequest,
        },
        report::{AthletePrResponse, PrFilter},
    },
    error::Result,
    models::Athlete,
    time::{format_seconds, format_time},
};
use uuid::Uuid;

/// Path value selecting every distance on the progress chart.
pub const ALL_DISTANCES: &str = "all";

/// List all athletes with race count and best 5K
pub async fn list_athletes(store: &dyn Store) -> Result<Vec<AthleteListResponse>> {
    let entries = store.list_athletes().await?;
    Ok(entries.into_iter().map(AthleteListResponse::from).collect())
}

/// Athlete with result history and personal records
pub async fn get_athlete_detail(store: &dyn Store, athlete_id: Uuid) -> Result<AthleteDetailResponse> {
    let athlete = store.find_athlete(athlete_id).await?;
    let rows = store.athlete_results(athlete_id).await?;
    let prs = store.athlete_prs(&PrFilter::for_athlete(athlete_id)).await?;

    let varsity_races = rows
        .iter()
        .filter(|r| r.race_class.eq_ignore_ascii_case("varsity"))
        .count();

    Ok(AthleteDetailResponse {
        athlete: AthleteResponse::from(athlete),
        results: rows.into_iter().map(AthleteResultResponse::from).collect(),
        personal_records: prs.into_iter().map(AthletePrResponse::from).collect(),
        varsity_races,
    })
}

pub async fn update_athlete(
    store: &dyn Store,
    athlete_id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<Athlete> {
    store.update_athlete(athlete_id, request).await
}

/// Chronological times at one distance, or at every distance for `all`
pub async fn get_progress(
    store: &dyn Store,
    athlete_id: Uuid,
    distance: &str,
) -> Result<Vec<ProgressPoint>> {
    store.find_athlete(athlete_id).await?;

    let mut rows = store.athlete_results(athlete_id).await?;
    if !distance.eq_ignore_ascii_case(ALL_DISTANCES) {
        rows.retain(|r| r.distance.eq_ignore_ascii_case(distance));
    }
    rows.sort_by(|a, b| a.meet_date.cmp(&b.meet_date));

    Ok(rows
        .into_iter()
        .map(|row| {
            let five_k_time = five_k_equivalent(row.time_seconds, &row.distance);
            ProgressPoint {
                date: row.meet_date,
                meet: row.meet_name,
                formatted_time: format_seconds(row.time_seconds),
                pace: calculate_pace(row.time_seconds, &row.distance),
                pace_seconds: pace_seconds(row.time_seconds, &row.distance),
                formatted_five_k_time: format_time(five_k_time),
                five_k_time,
                time: row.time_seconds,
                distance: row.distance,
            }
        })
        .collect())
}
