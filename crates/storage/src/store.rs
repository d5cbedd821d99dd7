//! Store seams shared by the loader, the dashboard and the tests.
//!
//! [`ResultStore`] hands out a [`RaceWriter`] scoped to one transaction; every
//! find-or-create and the existence check before inserting a result run inside
//! it, so a race either lands completely or not at all. [`ReportingStore`] is
//! read-only and always recomputes the derived views from the base tables.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::athlete::{AthleteListEntry, AthleteResultRow, UpdateAthleteRequest};
use crate::dto::report::{AthletePr, ExportRow, PrFilter, TeamStat};
use crate::dto::summary::DashboardSummary;
use crate::error::Result;
use crate::models::{Athlete, AthleteName, Gender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub location: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeet {
    pub name: String,
    pub meet_date: NaiveDate,
    pub season: String,
    pub source_url: Option<String>,
    pub venue_id: Uuid,
}

/// Natural key of a race inside a meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceKey {
    pub meet_id: Uuid,
    pub distance: String,
    pub race_class: String,
    pub gender: Gender,
}

/// Natural key of an athlete: name, gender and school.
///
/// An unknown school matches any athlete with the same name and gender. A
/// known school matches the same school, or an athlete whose school is still
/// unknown, which then takes it. Two runners sharing name, gender and school
/// collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAthlete {
    pub name: AthleteName,
    pub gender: Gender,
    pub school: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResult {
    pub race_id: Uuid,
    pub athlete_id: Uuid,
    pub time_seconds: Decimal,
    pub place: Option<i32>,
    pub varsity_points: Option<i32>,
}

/// Writes for a single race load, all inside one transaction.
///
/// Dropping a writer without calling [`RaceWriter::commit`] discards its writes.
#[async_trait]
pub trait RaceWriter: Send {
    async fn find_or_create_venue(&mut self, venue: &NewVenue) -> Result<Uuid>;

    /// Finds a meet by (name, date), attaching the venue, season and source.
    async fn find_or_create_meet(&mut self, meet: &NewMeet) -> Result<Uuid>;

    async fn find_or_create_race(&mut self, race: &RaceKey) -> Result<Uuid>;

    async fn find_or_create_athlete(&mut self, athlete: &NewAthlete) -> Result<Uuid>;

    async fn result_exists(&mut self, race_id: Uuid, athlete_id: Uuid) -> Result<bool>;

    async fn insert_result(&mut self, result: &NewResult) -> Result<Uuid>;

    async fn commit(&mut self) -> Result<()>;
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn RaceWriter>>;

    /// Deletes every row from every table. Destructive.
    async fn clear_all(&self) -> Result<()>;

    async fn count_results(&self) -> Result<i64>;

    async fn update_athlete(&self, athlete_id: Uuid, req: &UpdateAthleteRequest)
    -> Result<Athlete>;
}

#[async_trait]
pub trait ReportingStore: Send + Sync {
    async fn dashboard_summary(&self) -> Result<DashboardSummary>;

    /// Athletes ordered by last then first name.
    async fn list_athletes(&self) -> Result<Vec<AthleteListEntry>>;

    async fn find_athlete(&self, athlete_id: Uuid) -> Result<Athlete>;

    /// Results of one athlete, newest meet first.
    async fn athlete_results(&self, athlete_id: Uuid) -> Result<Vec<AthleteResultRow>>;

    /// `athlete_prs` view, ordered by gender, distance and best time.
    async fn athlete_prs(&self, filter: &PrFilter) -> Result<Vec<AthletePr>>;

    /// `team_stats` view, ordered by gender, distance and race class.
    async fn team_stats(&self) -> Result<Vec<TeamStat>>;

    /// Every result, ordered by meet date, meet, distance, race class and place.
    async fn export_rows(&self) -> Result<Vec<ExportRow>>;
}

pub trait Store: ResultStore + ReportingStore {}

impl<T: ResultStore + ReportingStore> Store for T {}
