//! Synthetic mock source for offline/demo use
//!
//! Replays the shape of the live Coinone payload with a last price that
//! drifts sinusoidally around a fixed base, so the widget animates
//! without network access.

use crate::{
    constants::{
        MOCK_BASE_PRICE, MOCK_HOUR_AMPLITUDE, MOCK_MICRO_AMPLITUDE, MOCK_MINUTE_AMPLITUDE,
    },
    error::SourceError,
    source::TickerSource,
    types::{PriceLevel, TickerResponse, TickerSnapshot},
};
use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};
use std::f64::consts::TAU;

/// Synthetic ticker source
pub struct MockSource;

impl MockSource {
    /// Creates a new mock source
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TickerSource for MockSource {
    async fn fetch_ticker(&self) -> Result<TickerResponse, SourceError> {
        let now = Utc::now();
        let mut response = synthetic_response();
        response.server_time = now.timestamp_millis();
        response.tickers[0].timestamp = now.timestamp_millis();
        response.tickers[0].id = now.timestamp_millis().to_string();
        response.tickers[0].last = format!("{:.2}", synthetic_price(now));
        Ok(response)
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

/// Synthetic last price at the given instant
///
/// Three additive sinusoids over the hour-of-day, minute-of-hour and
/// sub-second cycles. The summed amplitudes stay within ~12% of the base,
/// so the price is always inside that band.
pub fn synthetic_price(at: DateTime<Utc>) -> f64 {
    let hour_phase = f64::from(at.hour()) / 24.0;
    let minute_phase = f64::from(at.minute()) / 60.0;
    let micro_phase = f64::from(at.nanosecond().min(999_999_999)) / 1_000_000_000.0;

    MOCK_BASE_PRICE
        + MOCK_HOUR_AMPLITUDE * (TAU * hour_phase).sin()
        + MOCK_MINUTE_AMPLITUDE * (TAU * minute_phase).sin()
        + MOCK_MICRO_AMPLITUDE * (TAU * micro_phase).sin()
}

/// A full ticker response with the fixed demo payload
pub fn synthetic_response() -> TickerResponse {
    TickerResponse {
        result: "success".to_string(),
        error_code: "0".to_string(),
        error_msg: None,
        server_time: 0,
        tickers: vec![TickerSnapshot {
            quote_currency: "krw".to_string(),
            target_currency: "gm".to_string(),
            timestamp: 0,
            high: "97.0".to_string(),
            low: "40.51".to_string(),
            first: "85.6".to_string(),
            last: "54.4".to_string(),
            quote_volume: "224909714.1755".to_string(),
            target_volume: "4034269.03089779".to_string(),
            best_asks: vec![PriceLevel {
                price: "61.8".to_string(),
                qty: "10298.34531423".to_string(),
            }],
            best_bids: vec![PriceLevel {
                price: "51.05".to_string(),
                qty: "3568.708315".to_string(),
            }],
            id: "0".to_string(),
            yesterday_high: "85.86".to_string(),
            yesterday_low: "85.86".to_string(),
            yesterday_first: "85.86".to_string(),
            yesterday_last: "85.86".to_string(),
            yesterday_quote_volume: "0.0".to_string(),
            yesterday_target_volume: "0.0".to_string(),
        }],
    }
}
