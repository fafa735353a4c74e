// HTTP client for the batted-ball backend
//
// The base URL is injected at construction (config or --api-url), never a
// module-wide constant, so the client can point at a mock endpoint in tests
// without environment manipulation.

use crate::data::{BattedBall, Summary};
use crate::filters::Filters;
use anyhow::{Context, Result};
use std::time::Duration;

/// Request timeout - a stuck backend should surface as a fetch error,
/// not a perpetually loading chart
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Async client for the two backend endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the filtered record set from `GET /api/data`
    ///
    /// Only non-empty criteria are sent; reqwest percent-escapes values
    /// on the wire.
    pub async fn fetch_events(&self, filters: &Filters) -> Result<Vec<BattedBall>> {
        let url = format!("{}/api/data", self.base_url);
        tracing::debug!(query = %filters.encode(), "Fetching records");

        let response = self
            .http
            .get(&url)
            .query(&filters.pairs())
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .context("Records endpoint returned an error status")?;

        response
            .json::<Vec<BattedBall>>()
            .await
            .context("Malformed records response")
    }

    /// Fetch dataset-wide aggregates from `GET /api/summary` (no parameters)
    pub async fn fetch_summary(&self) -> Result<Summary> {
        let url = format!("{}/api/summary", self.base_url);
        tracing::debug!("Fetching summary");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .context("Summary endpoint returned an error status")?;

        response
            .json::<Summary>()
            .await
            .context("Malformed summary response")
    }
}
