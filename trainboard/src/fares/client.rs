//! Fares API HTTP client.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::domain::{Crs, FareSearchResult};

use super::convert::convert_response;
use super::error::FareError;
use super::source::FareSource;
use super::types::FareSearchResponse;

/// Default base URL for the fares API.
const DEFAULT_BASE_URL: &str = "https://int-test1.tram.softwire-lner-dev.co.uk/v1";

/// Configuration for the fares client.
#[derive(Debug, Clone)]
pub struct FareClientConfig {
    /// API key for x-api-key header authentication
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FareClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the fares API.
#[derive(Debug, Clone)]
pub struct FareClient {
    http: reqwest::Client,
    base_url: String,
}

impl FareClient {
    /// Create a new fares client.
    pub fn new(config: FareClientConfig) -> Result<Self, FareError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| FareError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-api-key"), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch fares for a one-way journey departing at `outbound`.
    ///
    /// One adult, no children, no inbound leg; the search core never asks
    /// for anything else.
    pub async fn fetch_fares(
        &self,
        origin: Crs,
        destination: Crs,
        outbound: DateTime<Utc>,
    ) -> Result<FareSearchResult, FareError> {
        let url = format!("{}/fares", self.base_url);

        debug!(%origin, %destination, %outbound, "fetching fares");

        let outbound_param = outbound.to_rfc3339();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("originStation", origin.as_str()),
                ("destinationStation", destination.as_str()),
                ("outboundDateTime", outbound_param.as_str()),
                ("numberOfAdults", "1"),
                ("numberOfChildren", "0"),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FareError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FareError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FareError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: FareSearchResponse =
            serde_json::from_str(&body).map_err(|e| FareError::Json {
                message: e.to_string(),
            })?;

        Ok(convert_response(response)?)
    }
}

impl FareSource for FareClient {
    fn search(
        &self,
        origin: Crs,
        destination: Crs,
        outbound: DateTime<Utc>,
    ) -> BoxFuture<'static, Result<FareSearchResult, FareError>> {
        let client = self.clone();
        async move { client.fetch_fares(origin, destination, outbound).await }.boxed()
    }
}
