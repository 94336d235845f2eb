//! Direct endpoint source implementation

use crate::{
    constants::{REQUEST_TIMEOUT_SECS, TICKER_API_URL, USER_AGENT},
    error::SourceError,
    source::TickerSource,
    types::TickerResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches the ticker with a plain GET against a single URL
///
/// The URL is either the exchange endpoint or the local dev reverse
/// proxy; both serve the same payload.
pub struct DirectSource {
    client: Client,
    url: String,
}

impl DirectSource {
    /// Creates a new direct source for the given URL
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(SourceError::NetworkError)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Creates a direct source for the given URL, panicking on TLS/client
    /// construction failure
    pub fn for_url(url: &str) -> Self {
        Self::new(url).expect("Failed to create direct ticker source")
    }
}

impl Default for DirectSource {
    fn default() -> Self {
        Self::for_url(TICKER_API_URL)
    }
}

#[async_trait]
impl TickerSource for DirectSource {
    async fn fetch_ticker(&self) -> Result<TickerResponse, SourceError> {
        tracing::debug!(url = %self.url, "Fetching ticker from direct endpoint");

        let response = super::request_ticker(&self.client, &self.url).await?;

        tracing::debug!(
            tickers = response.tickers.len(),
            server_time = response.server_time,
            "Successfully fetched ticker"
        );

        Ok(response)
    }

    fn source_name(&self) -> &'static str {
        "direct"
    }
}
