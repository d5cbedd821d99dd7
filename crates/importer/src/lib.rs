pub mod config;
pub mod error;
pub mod loader;
pub mod parser;
pub mod source;
pub mod summary;

pub use config::{RaceConfig, RaceEntry, RaceJob};
pub use error::{ImporterError, Result};
pub use loader::{Loader, RunOptions};
pub use parser::{RawRow, ResultPage, SkippedRow};
pub use source::{HttpPageSource, PageSource, ResultSource};
pub use summary::{RaceOutcome, RaceReport, RunSummary};
