//! Client side of the Dogma content API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

// --- Errors ---

/// Errors that can occur while fetching file content.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The Dogma server answered with a non-success status.
    #[error("server error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Failed to deserialize the response.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

// --- Request / Response Data ---

/// Identifies one file at one revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub project_name: String,
    pub repo_name: String,
    pub file_path: String,
    pub revision: String,
}

/// Textual content of one file at one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub path: String,
    pub content: String,
}

#[derive(Deserialize)]
struct EntryResponse {
    path: String,
    #[serde(default)]
    content: Value,
}

impl From<EntryResponse> for FileContent {
    fn from(entry: EntryResponse) -> Self {
        // JSON entries come back as structured values; TEXT entries as strings.
        let content = match entry.content {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
        };
        FileContent {
            path: entry.path,
            content,
        }
    }
}

// --- Client ---

/// Source of file content, keyed by [`QueryKey`].
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_file(&self, key: &QueryKey) -> ApiResult<FileContent>;
}

/// HTTP client for the Dogma v1 REST API.
#[derive(Clone)]
pub struct DogmaClient {
    base_url: String,
    token: String,
    http: Client,
}

impl DogmaClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            http: Client::builder().timeout(timeout).build()?,
        })
    }

    /// URL of the contents endpoint for `key`, every path segment percent-encoded.
    fn contents_url(&self, key: &QueryKey) -> String {
        let file_path = key
            .file_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::encode(s).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/api/v1/projects/{}/repos/{}/contents/{}",
            self.base_url,
            urlencoding::encode(&key.project_name),
            urlencoding::encode(&key.repo_name),
            file_path
        )
    }
}

#[async_trait]
impl ContentFetcher for DogmaClient {
    async fn fetch_file(&self, key: &QueryKey) -> ApiResult<FileContent> {
        let url = self.contents_url(key);
        info!("Fetching {} at revision {}", url, key.revision);

        let res = self
            .http
            .get(&url)
            .query(&[("revision", key.revision.as_str())])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        res.json::<EntryResponse>()
            .await
            .map(FileContent::from)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Dogma reports errors as `{"exception": ..., "message": ...}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
