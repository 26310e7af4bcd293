//! Departures endpoint HTTP client.
//!
//! One request per stop: `GET <base>/departures/<stopId>`. The client
//! carries a per-request timeout so a hung request cannot stall a refresh
//! cycle indefinitely, and a semaphore bounding concurrent requests across
//! however many stop panels share it.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;

use crate::domain::{DepartureSnapshot, StopId};
use crate::refresh::DepartureSource;

use super::convert::convert_board;
use super::error::FetchError;
use super::types::BoardResponse;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the departures client.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Base URL of the departures API.
    pub base_url: String,
    /// Maximum concurrent requests across all panels sharing this client.
    pub max_concurrent: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl BoardConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for the live departures endpoint.
#[derive(Debug, Clone)]
pub struct BoardClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl BoardClient {
    /// Create a new departures client with the given configuration.
    pub fn new(config: BoardConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch the departure board for one stop.
    ///
    /// On success the returned snapshot is already converted and projected
    /// to the fetch instant. Any non-success status, undecodable body, or
    /// invalid field is an error; the caller keeps whatever snapshot it
    /// already had.
    pub async fn fetch_board(&self, stop: &StopId) -> Result<DepartureSnapshot, FetchError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FetchError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/departures/{}", self.base_url, stop.as_str());

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let board: BoardResponse = serde_json::from_str(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        Ok(convert_board(&board, Utc::now())?)
    }
}

impl DepartureSource for BoardClient {
    async fn fetch(&self, stop: &StopId) -> Result<DepartureSnapshot, FetchError> {
        self.fetch_board(stop).await
    }
}
