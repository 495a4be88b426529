//! Rejseplanen REST client.
//!
//! Issues the three provider queries against the Rejseplanen XML interface.
//! The HTTP work is done by an async `reqwest` client; each trait call blocks
//! the current thread on the runtime handle until the answer is decoded, so
//! it must be called from a blocking context (e.g. `spawn_blocking`).

use std::time::Duration;

use tokio::runtime::Handle;
use tracing::debug;

use crate::domain::StationId;

use super::error::ProviderError;
use super::xml::parse_records;
use super::{Record, TransitDataProvider};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest body excerpt kept in an error message.
const ERROR_BODY_LIMIT: usize = 500;

/// Configuration for the Rejseplanen client.
#[derive(Debug, Clone)]
pub struct RejseplanenConfig {
    /// Base URL the endpoint names are appended to
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RejseplanenConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Live provider backed by the Rejseplanen REST API.
#[derive(Debug, Clone)]
pub struct RejseplanenClient {
    http: reqwest::Client,
    base_url: String,
    runtime: Handle,
}

impl RejseplanenClient {
    /// Create a client whose requests are driven by `runtime`.
    pub fn new(config: RejseplanenConfig, runtime: Handle) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            runtime,
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn fetch(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Record>, ProviderError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, ?query, "querying rejseplanen");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body = response.text().await?;
        parse_records(&body)
    }

    fn query(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Vec<Record>, ProviderError> {
        self.runtime.block_on(self.fetch(endpoint, query))
    }
}

fn flag(value: bool) -> String {
    u8::from(value).to_string()
}

fn nearby_query(x: i64, y: i64, max_radius: u32, max_results: u32) -> Vec<(&'static str, String)> {
    vec![
        ("coordX", x.to_string()),
        ("coordY", y.to_string()),
        ("maxRadius", max_radius.to_string()),
        ("maxNumber", max_results.to_string()),
    ]
}

fn board_query(
    stop_id: StationId,
    use_bus: bool,
    use_train: bool,
    use_metro: bool,
) -> Vec<(&'static str, String)> {
    vec![
        ("id", stop_id.to_string()),
        ("useBus", flag(use_bus)),
        ("useTog", flag(use_train)),
        ("useMetro", flag(use_metro)),
    ]
}

impl TransitDataProvider for RejseplanenClient {
    fn find_nearby(
        &self,
        x: i64,
        y: i64,
        max_radius: u32,
        max_results: u32,
    ) -> Result<Vec<Record>, ProviderError> {
        self.query("stopsNearby", &nearby_query(x, y, max_radius, max_results))
    }

    fn search_stop(&self, name: &str) -> Result<Vec<Record>, ProviderError> {
        self.query("location", &[("input", name.to_string())])
    }

    fn departure_board(
        &self,
        stop_id: StationId,
        use_bus: bool,
        use_train: bool,
        use_metro: bool,
    ) -> Result<Vec<Record>, ProviderError> {
        self.query(
            "departureBoard",
            &board_query(stop_id, use_bus, use_train, use_metro),
        )
    }
}
