//! Types for the live ticker widget
//!
//! The exchange serializes every numeric field as a JSON string, so the
//! wire model keeps them as strings and exposes typed parse accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope returned by the ticker endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerResponse {
    /// "success" or "error"
    pub result: String,

    /// "0" on success, an application error code otherwise
    pub error_code: String,

    /// Human-readable message accompanying an error result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,

    /// Server clock in unix milliseconds
    #[serde(default)]
    pub server_time: i64,

    /// Ticker records (the KRW/GM endpoint returns exactly one)
    #[serde(default)]
    pub tickers: Vec<TickerSnapshot>,
}

impl TickerResponse {
    /// True when the envelope carries an application-level error
    pub fn is_error(&self) -> bool {
        self.result == "error"
    }

    /// The first (and for this endpoint, only) ticker record
    pub fn ticker(&self) -> Option<&TickerSnapshot> {
        self.tickers.first()
    }
}

/// One point-in-time market summary record for a trading pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSnapshot {
    /// Quote currency code (e.g. "krw")
    pub quote_currency: String,

    /// Target currency code (e.g. "gm")
    pub target_currency: String,

    /// Record timestamp in unix milliseconds
    pub timestamp: i64,

    /// 24h high price
    pub high: String,

    /// 24h low price
    pub low: String,

    /// First traded price of the 24h window
    pub first: String,

    /// Last traded price
    pub last: String,

    /// 24h volume in the quote currency
    pub quote_volume: String,

    /// 24h volume in the target currency
    pub target_volume: String,

    /// Best ask price levels
    #[serde(default)]
    pub best_asks: Vec<PriceLevel>,

    /// Best bid price levels
    #[serde(default)]
    pub best_bids: Vec<PriceLevel>,

    /// Record id assigned by the exchange
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub yesterday_high: String,
    #[serde(default)]
    pub yesterday_low: String,
    #[serde(default)]
    pub yesterday_first: String,
    #[serde(default)]
    pub yesterday_last: String,
    #[serde(default)]
    pub yesterday_quote_volume: String,
    #[serde(default)]
    pub yesterday_target_volume: String,
}

impl TickerSnapshot {
    /// Last traded price parsed as a float, if well-formed
    pub fn last_price(&self) -> Option<f64> {
        self.last.parse().ok()
    }

    /// 24h quote-currency volume parsed as a float, if well-formed
    pub fn quote_volume_value(&self) -> Option<f64> {
        self.quote_volume.parse().ok()
    }

    /// 24h target-currency volume parsed as a float, if well-formed
    pub fn target_volume_value(&self) -> Option<f64> {
        self.target_volume.parse().ok()
    }

    /// Best ask price, if the exchange published one
    pub fn best_ask_price(&self) -> Option<f64> {
        self.best_asks.first().and_then(|l| l.price.parse().ok())
    }

    /// Best bid price, if the exchange published one
    pub fn best_bid_price(&self) -> Option<f64> {
        self.best_bids.first().and_then(|l| l.price.parse().ok())
    }
}

/// A single order book price level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price as quoted by the exchange
    pub price: String,
    /// Quantity available at that price
    pub qty: String,
}

/// Ticker events broadcast by the polling client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TickerEvent {
    /// A fresh snapshot was stored
    PriceUpdated {
        id: Uuid,
        old_price: Option<String>,
        new_price: String,
        timestamp: DateTime<Utc>,
    },

    /// A poll tick exhausted its retries
    FetchFailed {
        id: Uuid,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

impl TickerEvent {
    /// Creates a PriceUpdated event
    pub fn price_updated(old_price: Option<String>, new_price: String) -> Self {
        Self::PriceUpdated {
            id: Uuid::new_v4(),
            old_price,
            new_price,
            timestamp: Utc::now(),
        }
    }

    /// Creates a FetchFailed event
    pub fn fetch_failed(error_message: impl Into<String>) -> Self {
        Self::FetchFailed {
            id: Uuid::new_v4(),
            error_message: error_message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Get the event ID
    pub fn id(&self) -> Uuid {
        match self {
            TickerEvent::PriceUpdated { id, .. } => *id,
            TickerEvent::FetchFailed { id, .. } => *id,
        }
    }

    /// Get the event type as string
    pub fn event_type(&self) -> &'static str {
        match self {
            TickerEvent::PriceUpdated { .. } => "PRICE_UPDATED",
            TickerEvent::FetchFailed { .. } => "FETCH_FAILED",
        }
    }
}

impl std::fmt::Display for TickerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickerEvent::PriceUpdated {
                old_price,
                new_price,
                ..
            } => match old_price {
                Some(old) => write!(f, "Price updated: {} -> {}", old, new_price),
                None => write!(f, "Price updated: {}", new_price),
            },
            TickerEvent::FetchFailed { error_message, .. } => {
                write!(f, "Fetch failed: {}", error_message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response_json() -> &'static str {
        r#"{
            "result": "success",
            "error_code": "0",
            "server_time": 1744790000000,
            "tickers": [{
                "quote_currency": "krw",
                "target_currency": "gm",
                "timestamp": 1744790000000,
                "high": "97.0",
                "low": "40.51",
                "first": "85.6",
                "last": "54.4",
                "quote_volume": "224909714.1755",
                "target_volume": "4034269.03089779",
                "best_asks": [{"price": "61.8", "qty": "10298.34531423"}],
                "best_bids": [{"price": "51.05", "qty": "3568.708315"}],
                "id": "1744790000000",
                "yesterday_high": "85.86",
                "yesterday_low": "85.86",
                "yesterday_first": "85.86",
                "yesterday_last": "85.86",
                "yesterday_quote_volume": "0.0",
                "yesterday_target_volume": "0.0"
            }]
        }"#
    }

    #[test]
    fn parses_success_envelope() {
        let response: TickerResponse = serde_json::from_str(mock_response_json()).unwrap();
        assert!(!response.is_error());

        let ticker = response.ticker().unwrap();
        assert_eq!(ticker.last, "54.4");
        assert_eq!(ticker.last_price(), Some(54.4));
        assert_eq!(ticker.best_ask_price(), Some(61.8));
        assert_eq!(ticker.best_bid_price(), Some(51.05));
        assert_eq!(ticker.quote_volume_value(), Some(224909714.1755));
    }

    #[test]
    fn parses_error_envelope() {
        let json = r#"{"result": "error", "error_code": "107", "error_msg": "Parameter error"}"#;
        let response: TickerResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_error());
        assert!(response.ticker().is_none());
        assert_eq!(response.error_msg.as_deref(), Some("Parameter error"));
    }

    #[test]
    fn malformed_numbers_parse_to_none() {
        let mut response: TickerResponse = serde_json::from_str(mock_response_json()).unwrap();
        response.tickers[0].last = "not-a-number".to_string();
        assert_eq!(response.tickers[0].last_price(), None);
    }
}
