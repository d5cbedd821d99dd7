use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use importer::{
    ImporterError, Loader, PageSource, RaceConfig, RaceOutcome, ResultSource, RunOptions,
};
use rust_decimal::Decimal;
use storage::dto::athlete::UpdateAthleteRequest;
use storage::models::Athlete;
use storage::store::{NewAthlete, NewMeet, NewResult, NewVenue, RaceKey, RaceWriter, ResultStore};
use storage::{MemoryStore, StorageError};
use uuid::Uuid;

/// Serves local fixture files; every URL is unreachable.
struct FixturePages;

#[async_trait]
impl PageSource for FixturePages {
    async fn fetch(&self, source: &ResultSource) -> importer::Result<String> {
        match source {
            ResultSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ImporterError::fetch(path.display().to_string(), e)),
            ResultSource::Url(url) => Err(ImporterError::fetch(url.as_str(), "connection refused")),
        }
    }
}

/// Store whose writers reject every result written to races of one class.
struct RejectingStore {
    inner: MemoryStore,
    race_class: &'static str,
}

#[async_trait]
impl ResultStore for RejectingStore {
    async fn begin(&self) -> storage::Result<Box<dyn RaceWriter>> {
        Ok(Box::new(RejectingWriter {
            inner: self.inner.begin().await?,
            race_class: self.race_class,
            rejecting: false,
        }))
    }

    async fn clear_all(&self) -> storage::Result<()> {
        self.inner.clear_all().await
    }

    async fn count_results(&self) -> storage::Result<i64> {
        self.inner.count_results().await
    }

    async fn update_athlete(
        &self,
        athlete_id: Uuid,
        req: &UpdateAthleteRequest,
    ) -> storage::Result<Athlete> {
        self.inner.update_athlete(athlete_id, req).await
    }
}

struct RejectingWriter {
    inner: Box<dyn RaceWriter>,
    race_class: &'static str,
    rejecting: bool,
}

#[async_trait]
impl RaceWriter for RejectingWriter {
    async fn find_or_create_venue(&mut self, venue: &NewVenue) -> storage::Result<Uuid> {
        self.inner.find_or_create_venue(venue).await
    }

    async fn find_or_create_meet(&mut self, meet: &NewMeet) -> storage::Result<Uuid> {
        self.inner.find_or_create_meet(meet).await
    }

    async fn find_or_create_race(&mut self, race: &RaceKey) -> storage::Result<Uuid> {
        self.rejecting = race.race_class == self.race_class;
        self.inner.find_or_create_race(race).await
    }

    async fn find_or_create_athlete(&mut self, athlete: &NewAthlete) -> storage::Result<Uuid> {
        self.inner.find_or_create_athlete(athlete).await
    }

    async fn result_exists(&mut self, race_id: Uuid, athlete_id: Uuid) -> storage::Result<bool> {
        self.inner.result_exists(race_id, athlete_id).await
    }

    async fn insert_result(&mut self, result: &NewResult) -> storage::Result<Uuid> {
        if self.rejecting {
            return Err(StorageError::ConstraintViolation(
                "check: results.time_seconds".to_string(),
            ));
        }
        self.inner.insert_result(result).await
    }

    async fn commit(&mut self) -> storage::Result<()> {
        self.inner.commit().await
    }
}

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn race(name: &str, file: &str, class: &str, gender: &str) -> String {
    format!(
        r#"
  - name: {name}
    file: {file}
    distance: 5K
    race_class: {class}
    gender: {gender}
    venue: Edora Park
    venue_location: Fort Collins
    venue_state: CO
    date: 2024-09-07
    season: "2024""#
    )
}

fn config(entries: &[String]) -> RaceConfig {
    let yaml = format!("races:{}", entries.concat());
    RaceConfig::from_yaml(&yaml, &fixtures()).unwrap()
}

fn liberty_bell() -> RaceConfig {
    config(&[
        race("Liberty Bell", "girls_varsity.html", "varsity", "girls"),
        race("Liberty Bell", "boys_varsity.html", "varsity", "boys"),
        race("Liberty Bell", "boys_jv.html", "jv", "boys"),
    ])
}

fn options(clear_db: bool) -> RunOptions {
    RunOptions {
        clear_db,
        fetch_delay: Duration::ZERO,
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[tokio::test]
async fn test_last_first_row_becomes_athlete_and_result() {
    let store = MemoryStore::new();
    let loader = Loader::new(store.clone(), FixturePages, options(false));

    let summary = loader.run(&liberty_bell()).await.unwrap();
    assert_eq!(summary.failed(), 0);

    let athletes = store.athletes().await;
    let jane = athletes
        .iter()
        .find(|a| a.first_name == "Jane" && a.last_name == "Smith")
        .expect("Jane Smith loaded");
    assert_eq!(jane.gender, "female");

    let results = store.results().await;
    let result = results
        .iter()
        .find(|r| r.athlete_id == jane.athlete_id)
        .unwrap();
    assert_eq!(result.time_seconds, dec("1112.45"));
    assert_eq!(result.place, Some(3));
    assert_eq!(result.varsity_points, Some(5));
}

#[tokio::test]
async fn test_rerun_inserts_nothing_new() {
    let store = MemoryStore::new();
    let loader = Loader::new(store.clone(), FixturePages, options(false));
    let config = liberty_bell();

    let first = loader.run(&config).await.unwrap();
    let after_first = store.count_results().await.unwrap();
    assert_eq!(after_first, 9);
    assert_eq!(first.totals().inserted, 9);
    assert_eq!(first.totals().skipped, 2);

    let second = loader.run(&config).await.unwrap();
    assert_eq!(store.count_results().await.unwrap(), after_first);
    assert_eq!(second.totals().inserted, 0);
    assert_eq!(second.totals().duplicates, 9);

    assert_eq!(store.meets().await.len(), 1);
    assert_eq!(store.races().await.len(), 3);
}

#[tokio::test]
async fn test_clear_db_matches_fresh_load() {
    let config = liberty_bell();

    let fresh = MemoryStore::new();
    Loader::new(fresh.clone(), FixturePages, options(false))
        .run(&config)
        .await
        .unwrap();
    let fresh_count = fresh.count_results().await.unwrap();

    let reused = MemoryStore::new();
    let incremental = Loader::new(reused.clone(), FixturePages, options(false));
    incremental.run(&config).await.unwrap();
    incremental.run(&config).await.unwrap();

    Loader::new(reused.clone(), FixturePages, options(true))
        .run(&config)
        .await
        .unwrap();
    assert_eq!(reused.count_results().await.unwrap(), fresh_count);
    assert_eq!(reused.athletes().await.len(), fresh.athletes().await.len());
}

#[tokio::test]
async fn test_unreachable_source_fails_only_its_race() {
    let mut entries = vec![race("Liberty Bell", "girls_varsity.html", "varsity", "girls")];
    entries.push(
        r#"
  - name: Liberty Bell
    url: http://127.0.0.1:9/results/boys
    distance: 5K
    race_class: varsity
    gender: boys
    venue: Edora Park
    date: 2024-09-07
    season: "2024""#
            .to_string(),
    );
    entries.push(race("Liberty Bell", "boys_jv.html", "jv", "boys"));

    let store = MemoryStore::new();
    let summary = Loader::new(store.clone(), FixturePages, options(false))
        .run(&config(&entries))
        .await
        .unwrap();

    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);
    assert!(matches!(
        summary.races[1].outcome,
        RaceOutcome::Failed(ImporterError::Fetch { .. })
    ));
    assert_eq!(store.count_results().await.unwrap(), 6);
}

#[tokio::test]
async fn test_missing_file_fails_race_without_writes() {
    let store = MemoryStore::new();
    let summary = Loader::new(store.clone(), FixturePages, options(false))
        .run(&config(&[race("Opener", "missing.html", "varsity", "girls")]))
        .await
        .unwrap();

    assert!(matches!(
        summary.races[0].outcome,
        RaceOutcome::Failed(ImporterError::Fetch { .. })
    ));
    assert!(store.meets().await.is_empty());
}

#[tokio::test]
async fn test_missing_places_follow_source_order() {
    let store = MemoryStore::new();
    Loader::new(store.clone(), FixturePages, options(false))
        .run(&config(&[race("Liberty Bell", "boys_jv.html", "jv", "boys")]))
        .await
        .unwrap();

    let mut results = store.results().await;
    results.sort_by_key(|r| r.time_seconds);
    assert_eq!(results[0].place, Some(1));
    assert_eq!(results[1].place, Some(2));
    assert!(results.iter().all(|r| r.varsity_points == Some(0)));
}

#[tokio::test]
async fn test_mixed_race_uses_row_gender() {
    let store = MemoryStore::new();
    let summary = Loader::new(store.clone(), FixturePages, options(false))
        .run(&config(&[
            race("Liberty Bell", "girls_varsity.html", "varsity", "girls"),
            race("Liberty Bell", "open_mixed.html", "open", "mixed"),
        ]))
        .await
        .unwrap();

    let RaceOutcome::Loaded(report) = &summary.races[1].outcome else {
        panic!("mixed race failed");
    };
    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped, 1);

    let athletes = store.athletes().await;
    let janes: Vec<_> = athletes
        .iter()
        .filter(|a| a.first_name == "Jane" && a.last_name == "Smith")
        .collect();
    assert_eq!(janes.len(), 1);

    let ryan = athletes.iter().find(|a| a.first_name == "Ryan").unwrap();
    assert_eq!(ryan.gender, "male");
}

#[tokio::test]
async fn test_rejected_write_rolls_back_only_its_race() {
    let store = MemoryStore::new();
    let rejecting = RejectingStore {
        inner: store.clone(),
        race_class: "jv",
    };
    let summary = Loader::new(rejecting, FixturePages, options(false))
        .run(&liberty_bell())
        .await
        .unwrap();

    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);
    assert!(matches!(
        summary.races[2].outcome,
        RaceOutcome::Failed(ImporterError::Integrity(StorageError::ConstraintViolation(_)))
    ));

    let races = store.races().await;
    assert_eq!(races.len(), 2);
    assert!(races.iter().all(|r| r.race_class != "jv"));
    assert_eq!(store.count_results().await.unwrap(), 7);
    assert!(
        !store
            .athletes()
            .await
            .iter()
            .any(|a| a.last_name == "Price" || a.last_name == "Hill")
    );
}

#[tokio::test]
async fn test_clock_banner_does_not_hide_results() {
    let store = MemoryStore::new();
    let summary = Loader::new(store.clone(), FixturePages, options(false))
        .run(&config(&[race("Northern Conference", "clock_banner.html", "varsity", "girls")]))
        .await
        .unwrap();

    let RaceOutcome::Loaded(report) = &summary.races[0].outcome else {
        panic!("clock banner page failed to load");
    };
    assert_eq!(report.inserted, 2);

    let athletes = store.athletes().await;
    let ana = athletes.iter().find(|a| a.last_name == "Cruz").unwrap();
    assert_eq!(ana.school.as_deref(), Some("Fossil Ridge"));

    let mut times: Vec<Decimal> = store.results().await.iter().map(|r| r.time_seconds).collect();
    times.sort();
    assert_eq!(times, vec![dec("1082.00"), dec("1095.60")]);
}

#[tokio::test]
async fn test_pipe_text_page_loads_with_schools() {
    let store = MemoryStore::new();
    let summary = Loader::new(store.clone(), FixturePages, options(false))
        .run(&config(&[race("Northern Conference", "pipe_text.html", "varsity", "boys")]))
        .await
        .unwrap();
    assert_eq!(summary.failed(), 0);
    assert_eq!(store.count_results().await.unwrap(), 3);

    let athletes = store.athletes().await;
    let joey = athletes.iter().find(|a| a.first_name == "Joey").unwrap();
    assert_eq!(joey.last_name, "Benson");
    assert_eq!(joey.gender, "male");
    assert_eq!(joey.school.as_deref(), Some("Fossil Ridge High School"));

    let sam = athletes.iter().find(|a| a.last_name == "Ortiz").unwrap();
    assert_eq!(sam.school, None);
}

#[tokio::test]
async fn test_preformatted_dnf_line_is_counted_as_skipped() {
    let store = MemoryStore::new();
    let summary = Loader::new(store.clone(), FixturePages, options(false))
        .run(&config(&[race("Liberty Bell", "boys_varsity.html", "varsity", "boys")]))
        .await
        .unwrap();

    let RaceOutcome::Loaded(report) = &summary.races[0].outcome else {
        panic!("boys varsity failed to load");
    };
    assert_eq!(report.inserted, 3);
    assert_eq!(report.skipped, 1);
    assert!(!store.athletes().await.iter().any(|a| a.last_name == "Lee"));

    let schools: Vec<Option<String>> =
        store.athletes().await.into_iter().map(|a| a.school).collect();
    assert!(schools.contains(&Some("Fort Collins High School".to_string())));
}
