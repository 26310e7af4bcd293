//! Stop and route record API client.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{RouteId, StopId};

use super::error::RecordError;

/// Static facts about a stop, as shown on its panel header.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRecord {
    pub stop_id: String,
    pub name: String,
    pub locality: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Line metadata for labels and route listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub route_id: String,
    pub line_name: String,
    pub operator: Option<String>,
    pub description: Option<String>,
}

/// Configuration for the record client.
#[derive(Debug, Clone)]
pub struct RecordConfig {
    /// Base URL for the record API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RecordConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 15,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the stop/route record API.
#[derive(Debug, Clone)]
pub struct RecordClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecordClient {
    /// Create a new record client.
    pub fn new(config: RecordConfig) -> Result<Self, RecordError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the record for one stop.
    pub async fn fetch_stop(&self, stop: &StopId) -> Result<StopRecord, RecordError> {
        let url = format!("{}/stops/{}", self.base_url, stop.as_str());
        self.fetch_json(&url, stop.as_str()).await
    }

    /// Fetch the record for one route.
    pub async fn fetch_route(&self, route: &RouteId) -> Result<RouteRecord, RecordError> {
        let url = format!("{}/routes/{}", self.base_url, route.as_str());
        self.fetch_json(&url, route.as_str()).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str, id: &str) -> Result<T, RecordError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RecordError::NotFound(id.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecordError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RecordError::Json {
            message: e.to_string(),
        })
    }
}
