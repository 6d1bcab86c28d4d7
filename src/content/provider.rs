//! Content backends

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::model::{QuizItem, TipItem};

/// Errors that can occur when fetching content pools
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Reading a local content file failed
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Payload was not the expected JSON shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of the quiz and tip pools
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Fetch every quiz question
    async fn fetch_all_quizzes(&self) -> Result<Vec<QuizItem>, ProviderError>;

    /// Fetch every tip
    async fn fetch_all_tips(&self) -> Result<Vec<TipItem>, ProviderError>;
}

/// Reads `quizzes.json` and `tips.json` from a directory
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
}

impl DirectoryProvider {
    /// File holding the quiz pool
    pub const QUIZZES_FILE: &'static str = "quizzes.json";
    /// File holding the tip pool
    pub const TIPS_FILE: &'static str = "tips.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, ProviderError> {
        let path = self.dir.join(file);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ProviderError::Io { path: path.clone(), source })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[async_trait]
impl ContentProvider for DirectoryProvider {
    async fn fetch_all_quizzes(&self) -> Result<Vec<QuizItem>, ProviderError> {
        self.read_json(Self::QUIZZES_FILE).await
    }

    async fn fetch_all_tips(&self) -> Result<Vec<TipItem>, ProviderError> {
        self.read_json(Self::TIPS_FILE).await
    }
}

/// Fetches the pools from the coaching REST backend
pub struct HttpProvider {
    /// HTTP client
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl HttpProvider {
    /// Request timeout
    const TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a provider for the given backend base URL
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(Self::TIMEOUT).build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str) -> Result<T, ProviderError> {
        let response = self.client.get(self.url(resource)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentProvider for HttpProvider {
    async fn fetch_all_quizzes(&self) -> Result<Vec<QuizItem>, ProviderError> {
        self.get_json("quizzes").await
    }

    async fn fetch_all_tips(&self) -> Result<Vec<TipItem>, ProviderError> {
        self.get_json("tips").await
    }
}
