use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ImporterError, Result};

/// Where a race's results page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    File(PathBuf),
    Url(String),
}

impl ResultSource {
    /// A configured file wins over a configured URL.
    pub fn from_parts(url: Option<String>, file: Option<PathBuf>) -> Option<Self> {
        match (file, url) {
            (Some(file), _) => Some(Self::File(file)),
            (None, Some(url)) => Some(Self::Url(url)),
            (None, None) => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Fetches the raw HTML of a results page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, source: &ResultSource) -> Result<String>;
}

pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("xc-stats scraper/0.1")
            .build()
            .map_err(|e| ImporterError::Config(format!("HTTP client error: {}", e)))?;

        Ok(Self { client })
    }

    async fn fetch_url(&self, url: &str) -> Result<String> {
        tracing::info!("Fetching results from: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImporterError::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(ImporterError::fetch(
                url,
                format!("HTTP status {}", response.status()),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ImporterError::fetch(url, e))?;
        tracing::debug!("Fetched {} bytes of HTML", html.len());
        Ok(html)
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, source: &ResultSource) -> Result<String> {
        match source {
            ResultSource::Url(url) => self.fetch_url(url).await,
            ResultSource::File(path) => {
                let html = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| ImporterError::fetch(path.display().to_string(), e))?;
                tracing::info!("Read local results file: {} ({} bytes)", path.display(), html.len());
                Ok(html)
            }
        }
    }
}
