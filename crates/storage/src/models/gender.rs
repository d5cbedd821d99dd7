use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Mixed,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Mixed => "mixed",
        }
    }

    /// Athletes are never `mixed`; only races are.
    pub fn is_athlete_gender(&self) -> bool {
        !matches!(self, Self::Mixed)
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "boys" | "boy" | "men" => Ok(Self::Male),
            "female" | "f" | "girls" | "girl" | "women" => Ok(Self::Female),
            "mixed" | "x" | "open" => Ok(Self::Mixed),
            other => Err(format!(
                "unknown gender '{}', expected male, female or mixed",
                other
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
