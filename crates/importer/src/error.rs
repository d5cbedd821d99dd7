use storage::error::StorageError;
use storage::time::FormatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("Invalid time: {0}")]
    Format(#[from] FormatError),

    #[error("Failed to fetch {location}: {message}")]
    Fetch { location: String, message: String },

    #[error("Failed to parse results: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Store rejected write: {0}")]
    Integrity(#[from] StorageError),
}

impl ImporterError {
    pub fn fetch(location: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            location: location.into(),
            message: message.to_string(),
        }
    }

    /// Errors that abandon one race entry while the run moves on to the next.
    pub fn is_race_level(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::Parse(_) | Self::Integrity(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Format(_) => "format",
            Self::Fetch { .. } => "fetch",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::Integrity(_) => "integrity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_level_classification() {
        assert!(ImporterError::fetch("http://x", "timed out").is_race_level());
        assert!(ImporterError::Parse("no table".into()).is_race_level());
        assert!(ImporterError::Integrity(StorageError::NotFound).is_race_level());
        assert!(!ImporterError::Config("duplicate race".into()).is_race_level());
        assert!(!ImporterError::Format(FormatError::Empty).is_race_level());
    }

    #[test]
    fn test_fetch_message_names_location() {
        let err = ImporterError::fetch("results/opener.html", "No such file");
        assert_eq!(
            err.to_string(),
            "Failed to fetch results/opener.html: No such file"
        );
        assert_eq!(err.kind(), "fetch");
    }
}
