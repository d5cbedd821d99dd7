//! Idempotent loader.
//!
//! Each configured race is loaded inside its own store transaction. A result
//! is only inserted when the (race, athlete) pair has none yet, so re-running
//! the same configuration never duplicates rows.

use std::time::Duration;

use storage::models::Gender;
use storage::store::{NewAthlete, NewMeet, NewResult, NewVenue, RaceKey, ResultStore};
use tracing::{debug, error, info, warn};

use crate::config::{RaceConfig, RaceJob};
use crate::error::Result;
use crate::parser::{RawRow, ResultPage};
use crate::source::PageSource;
use crate::summary::{RaceOutcome, RaceReport, RunSummary};

/// Places 1 through 7 score in a varsity race.
const SCORING_PLACES: i32 = 7;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Delete every row before loading.
    pub clear_db: bool,
    /// Pause between two network fetches.
    pub fetch_delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            clear_db: false,
            fetch_delay: Duration::from_millis(2000),
        }
    }
}

pub struct Loader<S, P> {
    store: S,
    pages: P,
    options: RunOptions,
}

impl<S: ResultStore, P: PageSource> Loader<S, P> {
    pub fn new(store: S, pages: P, options: RunOptions) -> Self {
        Self {
            store,
            pages,
            options,
        }
    }

    /// Loads every configured race, continuing past races that fail.
    ///
    /// Only a failed `--clear-db` wipe aborts the run.
    pub async fn run(&self, config: &RaceConfig) -> Result<RunSummary> {
        if self.options.clear_db {
            warn!("Clearing all results, races, meets, venues and athletes");
            self.store.clear_all().await?;
        }

        let mut summary = RunSummary::default();
        let mut fetched_from_network = false;

        for job in config.races() {
            if job.source.is_network() {
                if fetched_from_network && !self.options.fetch_delay.is_zero() {
                    tokio::time::sleep(self.options.fetch_delay).await;
                }
                fetched_from_network = true;
            }

            let label = job.label();
            info!("Loading {} from {}", label, job.source);

            match self.load_race(job).await {
                Ok(report) => {
                    info!(
                        "Loaded {}: {} inserted, {} already present, {} skipped",
                        label, report.inserted, report.duplicates, report.skipped
                    );
                    summary.record(label, RaceOutcome::Loaded(report));
                }
                Err(e) => {
                    error!("Failed to load {}: {}", label, e);
                    summary.record(label, RaceOutcome::Failed(e));
                }
            }
        }

        Ok(summary)
    }

    /// Fetches, parses and writes one race.
    pub async fn load_race(&self, job: &RaceJob) -> Result<RaceReport> {
        let html = self.pages.fetch(&job.source).await?;
        let page = ResultPage::from_html(&html)?;
        debug!("{}: {} candidate rows ({:?})", job.label(), page.len(), page.layout());

        let mut writer = self.store.begin().await?;
        let mut report = RaceReport::default();

        let venue_id = writer
            .find_or_create_venue(&NewVenue {
                name: job.venue.clone(),
                location: job.venue_location.clone(),
                state: job.venue_state.clone(),
            })
            .await?;

        let meet_id = writer
            .find_or_create_meet(&NewMeet {
                name: job.name.clone(),
                meet_date: job.date,
                season: job.season.clone(),
                source_url: job.source_url.clone(),
                venue_id,
            })
            .await?;

        let race_id = writer
            .find_or_create_race(&RaceKey {
                meet_id,
                distance: job.distance.clone(),
                race_class: job.race_class.clone(),
                gender: job.gender,
            })
            .await?;

        for row in page.rows() {
            let row = match row {
                Ok(row) => row,
                Err(skipped) => {
                    warn!("{}: skipping {}", job.label(), skipped);
                    report.skipped += 1;
                    continue;
                }
            };

            let Some(gender) = athlete_gender(job.gender, &row) else {
                warn!(
                    "{}: skipping row {} ({} {}): no gender for mixed race",
                    job.label(),
                    row.position,
                    row.name.first_name(),
                    row.name.last_name()
                );
                report.skipped += 1;
                continue;
            };

            let athlete_id = writer
                .find_or_create_athlete(&NewAthlete {
                    name: row.name.clone(),
                    gender,
                    school: row.school.clone(),
                })
                .await?;

            if writer.result_exists(race_id, athlete_id).await? {
                debug!(
                    "Result for {} {} already present",
                    row.name.first_name(),
                    row.name.last_name()
                );
                report.duplicates += 1;
                continue;
            }

            let place = row.place.unwrap_or(row.position as i32);
            writer
                .insert_result(&NewResult {
                    race_id,
                    athlete_id,
                    time_seconds: row.time_seconds,
                    place: Some(place),
                    varsity_points: Some(varsity_points(&job.race_class, place)),
                })
                .await?;
            report.inserted += 1;
        }

        writer.commit().await?;
        Ok(report)
    }
}

/// Single-gender races give their gender to every runner; mixed races rely
/// on the row's own gender column.
fn athlete_gender(race_gender: Gender, row: &RawRow) -> Option<Gender> {
    match race_gender {
        Gender::Mixed => row.gender_hint,
        gender => Some(gender),
    }
}

pub fn varsity_points(race_class: &str, place: i32) -> i32 {
    if race_class.eq_ignore_ascii_case("varsity") && (1..=SCORING_PLACES).contains(&place) {
        SCORING_PLACES + 1 - place
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use storage::models::AthleteName;

    #[test]
    fn test_varsity_points() {
        assert_eq!(varsity_points("varsity", 1), 7);
        assert_eq!(varsity_points("Varsity", 7), 1);
        assert_eq!(varsity_points("varsity", 8), 0);
        assert_eq!(varsity_points("jv", 1), 0);
        assert_eq!(varsity_points("varsity", 0), 0);
    }

    #[test]
    fn test_athlete_gender_for_mixed_races() {
        let mut row = RawRow {
            position: 1,
            name: AthleteName::new("Jane", "Smith"),
            school: None,
            gender_hint: None,
            time_text: "18:32.45".to_string(),
            time_seconds: Decimal::new(111245, 2),
            place: None,
        };
        assert_eq!(athlete_gender(Gender::Female, &row), Some(Gender::Female));
        assert_eq!(athlete_gender(Gender::Mixed, &row), None);

        row.gender_hint = Some(Gender::Female);
        assert_eq!(athlete_gender(Gender::Male, &row), Some(Gender::Male));
        assert_eq!(athlete_gender(Gender::Mixed, &row), Some(Gender::Female));
    }
}
