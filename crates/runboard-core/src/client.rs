//! HTTP client for the telemetry API.
//!
//! All three endpoints are simple GETs. Errors are categorized so callers can
//! render them consistently; a server-side refresh failure (`success: false`)
//! surfaces as `ApiErrorKind::Server` carrying the server's message.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::event::Event;
use crate::stats::Stats;

/// Categories of API errors for consistent handling at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection, DNS, or timeout failure before a response arrived.
    Transport,
    /// Non-2xx HTTP status.
    HttpStatus,
    /// The response body was not the expected JSON shape.
    Parse,
    /// The server answered but reported a failure of its own.
    Server,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Parse => write!(f, "parse"),
            ApiErrorKind::Server => write!(f, "server"),
        }
    }
}

/// Structured API error with a category and a one-line display message.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ApiErrorKind::Transport, "request timed out")
        } else {
            Self::new(ApiErrorKind::Transport, err.to_string())
        }
    }

    fn http_status(status: reqwest::StatusCode) -> Self {
        Self::new(ApiErrorKind::HttpStatus, format!("HTTP {status}"))
    }

    fn parse(err: &reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Parse, format!("invalid response: {err}"))
    }

    fn server(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Server, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Body of `GET /api/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Thin client over the three telemetry endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetches the full event collection. On failure the caller keeps its
    /// previous set; there is no partial update.
    pub async fn fetch_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_json("/api/events").await
    }

    /// Asks the server to re-read its data source. A 2xx answer with
    /// `success: false` is an error carrying the server's message.
    pub async fn trigger_refresh(&self) -> Result<(), ApiError> {
        let body: RefreshResponse = self.get_json("/api/refresh").await?;
        if body.success {
            Ok(())
        } else {
            let err = ApiError::server(
                body.error.unwrap_or_else(|| "refresh failed".to_string()),
            );
            warn!(error = %err, "server refresh failed");
            Err(err)
        }
    }

    pub async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        self.get_json("/api/stats").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "api request");
        match self.get_json_at(&url).await {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(%url, error = %err, "api request failed");
                Err(err)
            }
        }
    }

    async fn get_json_at<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http_status(status));
        }
        response.json::<T>().await.map_err(|e| ApiError::parse(&e))
    }
}
