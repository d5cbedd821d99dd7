//! Race configuration file.
//!
//! ```yaml
//! races:
//!   - name: Liberty Bell Invitational
//!     file: html/liberty_bell_girls.html
//!     distance: 5K
//!     race_class: varsity
//!     gender: girls
//!     venue: Edora Park
//!     date: 2024-09-07
//!     season: "2024"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use storage::distance::distance_to_miles;
use storage::models::Gender;
use tracing::warn;

use crate::error::{ImporterError, Result};
use crate::source::ResultSource;

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    races: Vec<RaceEntry>,
}

/// One entry as written in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct RaceEntry {
    pub name: String,
    pub url: Option<String>,
    pub file: Option<PathBuf>,
    pub distance: String,
    pub race_class: String,
    pub gender: String,
    pub venue: String,
    pub venue_location: Option<String>,
    pub venue_state: Option<String>,
    pub date: NaiveDate,
    pub season: String,
}

/// A validated race entry ready for the loader.
#[derive(Debug, Clone)]
pub struct RaceJob {
    pub name: String,
    pub source: ResultSource,
    pub source_url: Option<String>,
    pub distance: String,
    pub race_class: String,
    pub gender: Gender,
    pub venue: String,
    pub venue_location: Option<String>,
    pub venue_state: Option<String>,
    pub date: NaiveDate,
    pub season: String,
}

impl RaceJob {
    pub fn label(&self) -> String {
        format!(
            "{} ({}) {} {} {}",
            self.name, self.date, self.race_class, self.gender, self.distance
        )
    }
}

#[derive(Debug, Clone)]
pub struct RaceConfig {
    races: Vec<RaceJob>,
}

impl RaceConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ImporterError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_yaml(&content, base_dir)
    }

    /// Parses and validates a configuration. Relative `file` paths are
    /// resolved against `base_dir`.
    pub fn from_yaml(content: &str, base_dir: &Path) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)
            .map_err(|e| ImporterError::Config(format!("invalid YAML: {}", e)))?;
        Self::from_entries(file.races, base_dir)
    }

    pub fn from_entries(entries: Vec<RaceEntry>, base_dir: &Path) -> Result<Self> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        let mut races = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let at = format!("race #{} '{}'", index + 1, entry.name);

            if entry.name.trim().is_empty() {
                errors.push(format!("{}: name is required", at));
            }
            if entry.venue.trim().is_empty() {
                errors.push(format!("{}: venue is required", at));
            }
            if entry.race_class.trim().is_empty() {
                errors.push(format!("{}: race_class is required", at));
            }
            if entry.distance.trim().is_empty() {
                errors.push(format!("{}: distance is required", at));
            } else if distance_to_miles(&entry.distance).is_none() {
                warn!("{}: unknown distance '{}', pace will not be computed", at, entry.distance);
            }

            let gender = match entry.gender.parse::<Gender>() {
                Ok(gender) => gender,
                Err(e) => {
                    errors.push(format!("{}: {}", at, e));
                    continue;
                }
            };

            let file = entry.file.map(|f| {
                if f.is_relative() {
                    base_dir.join(f)
                } else {
                    f
                }
            });
            let Some(source) = ResultSource::from_parts(entry.url.clone(), file) else {
                errors.push(format!("{}: either url or file is required", at));
                continue;
            };

            let race_class = entry.race_class.trim().to_lowercase();
            let key = (
                entry.name.clone(),
                entry.date,
                race_class.clone(),
                gender,
            );
            if !seen.insert(key) {
                errors.push(format!(
                    "{}: {} {} race listed twice for this meet",
                    at, race_class, gender
                ));
                continue;
            }

            races.push(RaceJob {
                name: entry.name,
                source,
                source_url: entry.url,
                distance: entry.distance.trim().to_string(),
                race_class,
                gender,
                venue: entry.venue,
                venue_location: entry.venue_location,
                venue_state: entry.venue_state,
                date: entry.date,
                season: entry.season,
            });
        }

        if !errors.is_empty() {
            return Err(ImporterError::Config(errors.join("; ")));
        }

        Ok(Self { races })
    }

    pub fn races(&self) -> &[RaceJob] {
        &self.races
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }
}
