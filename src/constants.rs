//! Constants for the live ticker widget
//!
//! All configuration for the ticker client is centralized here.
//! No runtime configuration (config.yml) is used - the system operates
//! transparently with these compile-time constants, apart from the
//! `TICKER_SOURCE` environment variable used for source selection.

/// How often to poll the ticker endpoint (in seconds)
pub const POLL_INTERVAL_SECS: u64 = 1;

/// How long before a stored snapshot is considered stale (in seconds)
pub const STALE_THRESHOLD_SECS: u64 = 30;

/// HTTP request timeout when fetching the ticker (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum number of fetch attempts per poll tick
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Fixed delay between retry attempts (in milliseconds)
pub const RETRY_DELAY_MS: u64 = 1000;

/// How long the price-change highlight stays on (in milliseconds)
pub const HIGHLIGHT_DURATION_MS: u64 = 1500;

/// Coinone public ticker endpoint for the KRW/GM pair
pub const TICKER_API_URL: &str = "https://api.coinone.co.kr/public/v2/ticker_new/KRW/GM";

/// Local dev reverse-proxy base (a vite-style `/api` rewrite to the exchange)
pub const DEV_PROXY_URL: &str = "http://localhost:5173/api/public/v2/ticker_new/KRW/GM";

/// Ordered CORS relay mirrors, tried in this order by the rotation source
pub const RELAY_URLS: &[&str] = &[
    "https://api.codetabs.com/v1/proxy?quest=https://api.coinone.co.kr/public/v2/ticker_new/KRW/GM",
    "https://corsproxy.io/?https%3A%2F%2Fapi.coinone.co.kr%2Fpublic%2Fv2%2Fticker_new%2FKRW%2FGM",
    "https://corsproxy.org/?https%3A%2F%2Fapi.coinone.co.kr%2Fpublic%2Fv2%2Fticker_new%2FKRW%2FGM",
];

/// Environment variable selecting the data source ("mock", "direct", "dev", "relay")
pub const SOURCE_ENV_VAR: &str = "TICKER_SOURCE";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "live-ticker-sdk/0.1.0";

/// Units held, multiplied by the last price for the holding-value line
pub const HOLDING_UNITS: f64 = 3_000_000.0;

/// Base amount scaled by the quote/target volume ratio for the bonus line
pub const BONUS_BASE: f64 = 150_000.0;

/// Base price for the synthetic mock feed
pub const MOCK_BASE_PRICE: f64 = 52.65;

/// Sinusoid amplitude of the hour-of-day cycle in the mock feed
pub const MOCK_HOUR_AMPLITUDE: f64 = 4.2;

/// Sinusoid amplitude of the minute-of-hour cycle in the mock feed
pub const MOCK_MINUTE_AMPLITUDE: f64 = 1.6;

/// Sinusoid amplitude of the sub-second cycle in the mock feed
pub const MOCK_MICRO_AMPLITUDE: f64 = 0.5;
