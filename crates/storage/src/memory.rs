//! In-process store.
//!
//! Keeps the five base tables in memory and computes `athlete_prs` and
//! `team_stats` on every query, the same way the SQL views do. A writer works
//! on a staged copy of the tables while holding the store lock and swaps it in
//! on commit.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::dto::athlete::{AthleteListEntry, AthleteResultRow, UpdateAthleteRequest};
use crate::dto::report::{AthletePr, ExportRow, PrFilter, TeamStat};
use crate::dto::summary::{DashboardSummary, RecentMeet, TeamTotals};
use crate::error::{Result, StorageError};
use crate::models::{Athlete, Meet, Race, RaceResult, Venue};
use crate::store::{
    NewAthlete, NewMeet, NewResult, NewVenue, RaceKey, RaceWriter, ReportingStore, ResultStore,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    venues: Vec<Venue>,
    meets: Vec<Meet>,
    races: Vec<Race>,
    athletes: Vec<Athlete>,
    results: Vec<RaceResult>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    school: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view of the same tables whose reporting queries only see athletes of
    /// `school`.
    pub fn with_school(&self, school: Option<String>) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            school,
        }
    }

    fn scope(&self) -> Option<&str> {
        self.school.as_deref()
    }

    pub async fn athletes(&self) -> Vec<Athlete> {
        self.tables.lock().await.athletes.clone()
    }

    pub async fn results(&self) -> Vec<RaceResult> {
        self.tables.lock().await.results.clone()
    }

    pub async fn races(&self) -> Vec<Race> {
        self.tables.lock().await.races.clone()
    }

    pub async fn meets(&self) -> Vec<Meet> {
        self.tables.lock().await.meets.clone()
    }
}

pub struct MemoryRaceWriter {
    guard: Option<OwnedMutexGuard<Tables>>,
    staged: Tables,
}

impl MemoryRaceWriter {
    fn ensure_open(&self) -> Result<()> {
        if self.guard.is_none() {
            return Err(StorageError::TransactionClosed);
        }
        Ok(())
    }
}

#[async_trait]
impl RaceWriter for MemoryRaceWriter {
    async fn find_or_create_venue(&mut self, venue: &NewVenue) -> Result<Uuid> {
        self.ensure_open()?;
        if let Some(existing) = self.staged.venues.iter().find(|v| v.name == venue.name) {
            return Ok(existing.venue_id);
        }

        let venue_id = Uuid::new_v4();
        self.staged.venues.push(Venue {
            venue_id,
            name: venue.name.clone(),
            location: venue.location.clone(),
            state: venue.state.clone(),
        });
        Ok(venue_id)
    }

    async fn find_or_create_meet(&mut self, meet: &NewMeet) -> Result<Uuid> {
        self.ensure_open()?;
        if !self.staged.venues.iter().any(|v| v.venue_id == meet.venue_id) {
            return Err(StorageError::ConstraintViolation(
                "foreign key: meets.venue_id".to_string(),
            ));
        }

        if let Some(existing) = self
            .staged
            .meets
            .iter_mut()
            .find(|m| m.name == meet.name && m.meet_date == meet.meet_date)
        {
            existing.season = meet.season.clone();
            existing.venue_id = Some(meet.venue_id);
            if meet.source_url.is_some() {
                existing.source_url = meet.source_url.clone();
            }
            return Ok(existing.meet_id);
        }

        let meet_id = Uuid::new_v4();
        self.staged.meets.push(Meet {
            meet_id,
            name: meet.name.clone(),
            meet_date: meet.meet_date,
            season: meet.season.clone(),
            source_url: meet.source_url.clone(),
            venue_id: Some(meet.venue_id),
        });
        Ok(meet_id)
    }

    async fn find_or_create_race(&mut self, race: &RaceKey) -> Result<Uuid> {
        self.ensure_open()?;
        if !self.staged.meets.iter().any(|m| m.meet_id == race.meet_id) {
            return Err(StorageError::ConstraintViolation(
                "foreign key: races.meet_id".to_string(),
            ));
        }

        if let Some(existing) = self.staged.races.iter().find(|r| {
            r.meet_id == race.meet_id
                && r.distance == race.distance
                && r.race_class == race.race_class
                && r.gender == race.gender.as_str()
        }) {
            return Ok(existing.race_id);
        }

        let race_id = Uuid::new_v4();
        self.staged.races.push(Race {
            race_id,
            meet_id: race.meet_id,
            distance: race.distance.clone(),
            race_class: race.race_class.clone(),
            gender: race.gender.as_str().to_string(),
        });
        Ok(race_id)
    }

    async fn find_or_create_athlete(&mut self, athlete: &NewAthlete) -> Result<Uuid> {
        self.ensure_open()?;
        if !athlete.gender.is_athlete_gender() {
            return Err(StorageError::ConstraintViolation(
                "check: athletes.gender".to_string(),
            ));
        }

        let (first_name, last_name) = athlete.name.as_database_tuple();
        let incoming = athlete.school.as_deref();
        let mut candidates: Vec<&mut Athlete> = self
            .staged
            .athletes
            .iter_mut()
            .filter(|a| {
                a.first_name == first_name
                    && a.last_name == last_name
                    && a.gender == athlete.gender.as_str()
                    && (incoming.is_none()
                        || a.school.is_none()
                        || a.school.as_deref() == incoming)
            })
            .collect();
        // Exact school first, then creation order.
        candidates.sort_by_key(|a| {
            (
                incoming.is_none() || a.school.as_deref() != incoming,
                a.created_at,
            )
        });
        if let Some(existing) = candidates.into_iter().next() {
            if existing.school.is_none() {
                existing.school = athlete.school.clone();
            }
            return Ok(existing.athlete_id);
        }

        let athlete_id = Uuid::new_v4();
        self.staged.athletes.push(Athlete {
            athlete_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender: athlete.gender.as_str().to_string(),
            school: athlete.school.clone(),
            graduation_year: None,
            created_at: chrono::Utc::now().naive_utc(),
        });
        Ok(athlete_id)
    }

    async fn result_exists(&mut self, race_id: Uuid, athlete_id: Uuid) -> Result<bool> {
        self.ensure_open()?;
        Ok(self
            .staged
            .results
            .iter()
            .any(|r| r.race_id == race_id && r.athlete_id == athlete_id))
    }

    async fn insert_result(&mut self, result: &NewResult) -> Result<Uuid> {
        self.ensure_open()?;
        if !self.staged.races.iter().any(|r| r.race_id == result.race_id) {
            return Err(StorageError::ConstraintViolation(
                "foreign key: results.race_id".to_string(),
            ));
        }
        if !self
            .staged
            .athletes
            .iter()
            .any(|a| a.athlete_id == result.athlete_id)
        {
            return Err(StorageError::ConstraintViolation(
                "foreign key: results.athlete_id".to_string(),
            ));
        }
        if result.time_seconds.is_sign_negative() {
            return Err(StorageError::ConstraintViolation(
                "check: results.time_seconds".to_string(),
            ));
        }
        if self
            .staged
            .results
            .iter()
            .any(|r| r.race_id == result.race_id && r.athlete_id == result.athlete_id)
        {
            return Err(StorageError::ConstraintViolation(
                "unique: results (race_id, athlete_id)".to_string(),
            ));
        }

        let result_id = Uuid::new_v4();
        self.staged.results.push(RaceResult {
            result_id,
            race_id: result.race_id,
            athlete_id: result.athlete_id,
            time_seconds: result.time_seconds,
            place: result.place,
            varsity_points: result.varsity_points,
        });
        Ok(result_id)
    }

    async fn commit(&mut self) -> Result<()> {
        let mut guard = self.guard.take().ok_or(StorageError::TransactionClosed)?;
        *guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn RaceWriter>> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryRaceWriter {
            guard: Some(guard),
            staged,
        }))
    }

    async fn clear_all(&self) -> Result<()> {
        *self.tables.lock().await = Tables::default();
        Ok(())
    }

    async fn count_results(&self) -> Result<i64> {
        Ok(self.tables.lock().await.results.len() as i64)
    }

    async fn update_athlete(
        &self,
        athlete_id: Uuid,
        req: &UpdateAthleteRequest,
    ) -> Result<Athlete> {
        let mut tables = self.tables.lock().await;
        let athlete = tables
            .athletes
            .iter_mut()
            .find(|a| a.athlete_id == athlete_id)
            .ok_or(StorageError::NotFound)?;
        athlete.graduation_year = req.graduation_year;
        Ok(athlete.clone())
    }
}

/// A result joined with everything the reports need.
struct Joined<'a> {
    result: &'a RaceResult,
    athlete: &'a Athlete,
    race: &'a Race,
    meet: &'a Meet,
}

fn in_school(athlete: &Athlete, school: Option<&str>) -> bool {
    school.is_none_or(|s| athlete.school.as_deref() == Some(s))
}

impl Tables {
    fn joined(&self, school: Option<&str>) -> Vec<Joined<'_>> {
        let athletes: HashMap<Uuid, &Athlete> =
            self.athletes.iter().map(|a| (a.athlete_id, a)).collect();
        let races: HashMap<Uuid, &Race> = self.races.iter().map(|r| (r.race_id, r)).collect();
        let meets: HashMap<Uuid, &Meet> = self.meets.iter().map(|m| (m.meet_id, m)).collect();

        self.results
            .iter()
            .filter_map(|result| {
                let athlete = athletes
                    .get(&result.athlete_id)
                    .copied()
                    .filter(|a| in_school(a, school))?;
                let race = races.get(&result.race_id).copied()?;
                let meet = meets.get(&race.meet_id).copied()?;
                Some(Joined {
                    result,
                    athlete,
                    race,
                    meet,
                })
            })
            .collect()
    }

    fn venue_name(&self, venue_id: Option<Uuid>) -> Option<String> {
        let venue_id = venue_id?;
        self.venues
            .iter()
            .find(|v| v.venue_id == venue_id)
            .map(|v| v.name.clone())
    }

    fn athlete_prs(&self, school: Option<&str>) -> Vec<AthletePr> {
        let mut groups: BTreeMap<(Uuid, String), AthletePr> = BTreeMap::new();

        for row in self.joined(school) {
            let key = (row.athlete.athlete_id, row.race.distance.clone());
            let time = row.result.time_seconds;
            groups
                .entry(key)
                .and_modify(|pr| {
                    pr.best_time_seconds = pr.best_time_seconds.min(time);
                    pr.race_count += 1;
                })
                .or_insert_with(|| AthletePr {
                    athlete_id: row.athlete.athlete_id,
                    first_name: row.athlete.first_name.clone(),
                    last_name: row.athlete.last_name.clone(),
                    gender: row.athlete.gender.clone(),
                    school: row.athlete.school.clone(),
                    distance: row.race.distance.clone(),
                    best_time_seconds: time,
                    race_count: 1,
                });
        }

        let mut prs: Vec<AthletePr> = groups.into_values().collect();
        prs.sort_by(|a, b| {
            a.gender
                .cmp(&b.gender)
                .then_with(|| a.distance.cmp(&b.distance))
                .then_with(|| a.best_time_seconds.cmp(&b.best_time_seconds))
                .then_with(|| a.last_name.cmp(&b.last_name))
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        prs
    }

    fn team_stats(&self, school: Option<&str>) -> Vec<TeamStat> {
        struct Acc {
            athletes: HashSet<Uuid>,
            best: Decimal,
            sum: Decimal,
            count: i64,
        }

        let mut groups: BTreeMap<(String, String, String), Acc> = BTreeMap::new();

        for row in self.joined(school) {
            let key = (
                row.athlete.gender.clone(),
                row.race.distance.clone(),
                row.race.race_class.clone(),
            );
            let time = row.result.time_seconds;
            let acc = groups.entry(key).or_insert_with(|| Acc {
                athletes: HashSet::new(),
                best: time,
                sum: Decimal::ZERO,
                count: 0,
            });
            acc.athletes.insert(row.athlete.athlete_id);
            acc.best = acc.best.min(time);
            acc.sum += time;
            acc.count += 1;
        }

        groups
            .into_iter()
            .map(|((gender, distance, race_class), acc)| TeamStat {
                gender,
                distance,
                race_class,
                athlete_count: acc.athletes.len() as i64,
                best_time_seconds: acc.best,
                avg_time_seconds: (acc.sum / Decimal::from(acc.count))
                    .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero),
            })
            .collect()
    }
}

#[async_trait]
impl ReportingStore for MemoryStore {
    async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let tables = self.tables.lock().await;

        let mut meets: Vec<&Meet> = tables.meets.iter().collect();
        let totals = match self.scope() {
            None => TeamTotals {
                total_athletes: tables.athletes.len() as i64,
                total_meets: tables.meets.len() as i64,
                total_races: tables.races.len() as i64,
                total_results: tables.results.len() as i64,
            },
            Some(school) => {
                let joined = tables.joined(Some(school));
                let meet_ids: HashSet<Uuid> = joined.iter().map(|row| row.meet.meet_id).collect();
                let race_ids: HashSet<Uuid> = joined.iter().map(|row| row.race.race_id).collect();
                meets.retain(|m| meet_ids.contains(&m.meet_id));
                TeamTotals {
                    total_athletes: tables
                        .athletes
                        .iter()
                        .filter(|a| in_school(a, Some(school)))
                        .count() as i64,
                    total_meets: meet_ids.len() as i64,
                    total_races: race_ids.len() as i64,
                    total_results: joined.len() as i64,
                }
            }
        };

        meets.sort_by(|a, b| b.meet_date.cmp(&a.meet_date).then_with(|| a.name.cmp(&b.name)));

        let recent_meets = meets
            .into_iter()
            .take(5)
            .map(|m| RecentMeet {
                name: m.name.clone(),
                meet_date: m.meet_date,
                venue_name: tables.venue_name(m.venue_id),
            })
            .collect();

        Ok(DashboardSummary {
            totals,
            recent_meets,
        })
    }

    async fn list_athletes(&self) -> Result<Vec<AthleteListEntry>> {
        let tables = self.tables.lock().await;
        let joined = tables.joined(self.scope());

        let mut entries: Vec<AthleteListEntry> = tables
            .athletes
            .iter()
            .filter(|athlete| in_school(athlete, self.scope()))
            .map(|athlete| {
                let own = joined
                    .iter()
                    .filter(|row| row.athlete.athlete_id == athlete.athlete_id);
                let race_count = own.clone().count() as i64;
                let best_5k_seconds = own
                    .filter(|row| row.race.distance.eq_ignore_ascii_case("5K"))
                    .map(|row| row.result.time_seconds)
                    .min();

                AthleteListEntry {
                    athlete_id: athlete.athlete_id,
                    first_name: athlete.first_name.clone(),
                    last_name: athlete.last_name.clone(),
                    gender: athlete.gender.clone(),
                    school: athlete.school.clone(),
                    graduation_year: athlete.graduation_year,
                    race_count,
                    best_5k_seconds,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(entries)
    }

    async fn find_athlete(&self, athlete_id: Uuid) -> Result<Athlete> {
        self.tables
            .lock()
            .await
            .athletes
            .iter()
            .find(|a| a.athlete_id == athlete_id && in_school(a, self.scope()))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn athlete_results(&self, athlete_id: Uuid) -> Result<Vec<AthleteResultRow>> {
        let tables = self.tables.lock().await;

        let mut rows: Vec<AthleteResultRow> = tables
            .joined(None)
            .into_iter()
            .filter(|row| row.athlete.athlete_id == athlete_id)
            .map(|row| AthleteResultRow {
                result_id: row.result.result_id,
                meet_name: row.meet.name.clone(),
                meet_date: row.meet.meet_date,
                venue_name: tables.venue_name(row.meet.venue_id),
                distance: row.race.distance.clone(),
                race_class: row.race.race_class.clone(),
                time_seconds: row.result.time_seconds,
                place: row.result.place,
                varsity_points: row.result.varsity_points,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.meet_date
                .cmp(&a.meet_date)
                .then_with(|| a.meet_name.cmp(&b.meet_name))
                .then_with(|| a.time_seconds.cmp(&b.time_seconds))
        });
        Ok(rows)
    }

    async fn athlete_prs(&self, filter: &PrFilter) -> Result<Vec<AthletePr>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .athlete_prs(self.scope())
            .into_iter()
            .filter(|pr| filter.matches(pr))
            .collect())
    }

    async fn team_stats(&self) -> Result<Vec<TeamStat>> {
        Ok(self.tables.lock().await.team_stats(self.scope()))
    }

    async fn export_rows(&self) -> Result<Vec<ExportRow>> {
        let tables = self.tables.lock().await;

        let mut rows: Vec<ExportRow> = tables
            .joined(self.scope())
            .into_iter()
            .map(|row| ExportRow {
                athlete_id: row.athlete.athlete_id,
                first_name: row.athlete.first_name.clone(),
                last_name: row.athlete.last_name.clone(),
                gender: row.athlete.gender.clone(),
                meet_id: row.meet.meet_id,
                meet_name: row.meet.name.clone(),
                meet_date: row.meet.meet_date,
                race_class: row.race.race_class.clone(),
                distance: row.race.distance.clone(),
                time_seconds: row.result.time_seconds,
                place: row.result.place,
            })
            .collect();

        rows.sort_by(|a, b| {
            a.meet_date
                .cmp(&b.meet_date)
                .then_with(|| a.meet_name.cmp(&b.meet_name))
                .then_with(|| a.distance.cmp(&b.distance))
                .then_with(|| a.race_class.cmp(&b.race_class))
                .then_with(|| place_nulls_last(a.place, b.place))
                .then_with(|| a.time_seconds.cmp(&b.time_seconds))
        });
        Ok(rows)
    }
}

fn place_nulls_last(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
