//! # Live Ticker SDK
//!
//! Polls the Coinone public ticker for the KRW/GM pair and keeps a
//! live-updating widget state with derived financial figures.
//!
//! The exchange endpoint does not send CORS headers, so the default
//! source rotates through a list of public CORS relay mirrors; a direct
//! source, a local dev reverse-proxy source, and an offline mock
//! generator are also available (selected via the `TICKER_SOURCE`
//! environment variable).
//!
//! ## Usage
//!
//! The client uses a singleton pattern for easy access throughout the
//! application:
//!
//! ```no_run
//! use live_ticker_sdk::{TickerClient, WidgetView};
//!
//! # async fn example() {
//! // Get the global client instance
//! let client = TickerClient::global().await;
//!
//! // Render the current widget state
//! match client.view().await {
//!     WidgetView::Loading => println!("loading..."),
//!     WidgetView::Error(_) => println!("live data unavailable"),
//!     WidgetView::Ready(fields) => println!("GM: {}", fields.price),
//! }
//! # }
//! ```

pub mod client;
pub mod constants;
pub mod error;
pub mod format;
pub mod health;
pub mod highlight;
pub mod source;
pub mod sources;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use client::TickerClient;
pub use error::{SourceError, TickerError};
pub use format::{
    format_decimals_with_commas, format_millions_with_commas, format_percent_with_decimals,
    truncate_decimals,
};
pub use health::PollHealth;
pub use highlight::PriceChangeTracker;
pub use source::TickerSource;
pub use types::{PriceLevel, TickerEvent, TickerResponse, TickerSnapshot};
pub use view::{DisplayFields, WidgetView};
