use std::fmt;

use tracing::{error, info, warn};

use crate::error::ImporterError;

/// Row counts for one loaded race.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaceReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub enum RaceOutcome {
    Loaded(RaceReport),
    Failed(ImporterError),
}

#[derive(Debug)]
pub struct RaceSummary {
    pub race: String,
    pub outcome: RaceOutcome,
}

/// Per-race results of one scrape run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub races: Vec<RaceSummary>,
}

impl RunSummary {
    pub fn record(&mut self, race: String, outcome: RaceOutcome) {
        self.races.push(RaceSummary { race, outcome });
    }

    pub fn succeeded(&self) -> usize {
        self.races
            .iter()
            .filter(|r| matches!(r.outcome, RaceOutcome::Loaded(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.races.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn totals(&self) -> RaceReport {
        self.races
            .iter()
            .filter_map(|r| match &r.outcome {
                RaceOutcome::Loaded(report) => Some(*report),
                RaceOutcome::Failed(_) => None,
            })
            .fold(RaceReport::default(), |acc, r| RaceReport {
                inserted: acc.inserted + r.inserted,
                duplicates: acc.duplicates + r.duplicates,
                skipped: acc.skipped + r.skipped,
            })
    }

    pub fn log(&self) {
        let totals = self.totals();
        info!(
            "Scrape finished: {} race(s) loaded, {} failed; {} result(s) inserted, {} already present, {} row(s) skipped",
            self.succeeded(),
            self.failed(),
            totals.inserted,
            totals.duplicates,
            totals.skipped
        );

        for race in &self.races {
            match &race.outcome {
                RaceOutcome::Loaded(report) if report.skipped > 0 => {
                    warn!("{}: {} row(s) skipped", race.race, report.skipped)
                }
                RaceOutcome::Loaded(_) => {}
                RaceOutcome::Failed(e) => error!("{}: {} error: {}", race.race, e.kind(), e),
            }
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for race in &self.races {
            match &race.outcome {
                RaceOutcome::Loaded(r) => writeln!(
                    f,
                    "  OK    {}: {} inserted, {} already present, {} skipped",
                    race.race, r.inserted, r.duplicates, r.skipped
                )?,
                RaceOutcome::Failed(e) => writeln!(f, "  FAIL  {}: {}", race.race, e)?,
            }
        }
        let totals = self.totals();
        write!(
            f,
            "{} succeeded, {} failed ({} inserted, {} skipped)",
            self.succeeded(),
            self.failed(),
            totals.inserted,
            totals.skipped
        )
    }
}
