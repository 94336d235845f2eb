//! Ticker data source implementations

use crate::{
    constants::{DEV_PROXY_URL, SOURCE_ENV_VAR, TICKER_API_URL},
    error::SourceError,
    source::TickerSource,
    types::TickerResponse,
};
use std::sync::Arc;

pub mod direct;
pub mod mock;
pub mod relay;

pub use direct::DirectSource;
pub use mock::MockSource;
pub use relay::RelaySource;

/// Selects the active data source from the `TICKER_SOURCE` environment
/// variable
///
/// `"mock"` uses the synthetic generator, `"direct"` hits the exchange
/// endpoint, `"dev"` goes through the local dev reverse proxy. Anything
/// else (including unset) selects the CORS relay rotation.
pub fn select_source() -> Arc<dyn TickerSource> {
    let source_name = std::env::var(SOURCE_ENV_VAR).unwrap_or_else(|_| "relay".to_string());

    match source_name.to_lowercase().as_str() {
        "mock" => Arc::new(MockSource::new()),
        "direct" => Arc::new(DirectSource::for_url(TICKER_API_URL)),
        "dev" => Arc::new(DirectSource::for_url(DEV_PROXY_URL)),
        _ => Arc::new(RelaySource::default()),
    }
}

/// Issues one GET against `url` and normalizes every failure mode into a
/// `SourceError`: transport errors, 429, non-2xx statuses, unparseable
/// bodies, and `result == "error"` envelopes.
pub(crate) async fn request_ticker(
    client: &reqwest::Client,
    url: &str,
) -> Result<TickerResponse, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(SourceError::NetworkError)?;

    if response.status().as_u16() == 429 {
        return Err(SourceError::RateLimitExceeded);
    }

    if !response.status().is_success() {
        return Err(SourceError::HttpStatus(response.status().as_u16()));
    }

    let body = response.text().await.map_err(SourceError::NetworkError)?;

    let ticker_response: TickerResponse = serde_json::from_str(&body).map_err(|e| {
        SourceError::invalid(format!(
            "Failed to parse ticker response: {}. Response: {}",
            e, body
        ))
    })?;

    if ticker_response.is_error() {
        return Err(SourceError::api(
            ticker_response.error_code.clone(),
            ticker_response
                .error_msg
                .clone()
                .unwrap_or_else(|| "unknown API error".to_string()),
        ));
    }

    if ticker_response.ticker().is_none() {
        return Err(SourceError::invalid("Response contains no ticker records"));
    }

    Ok(ticker_response)
}
