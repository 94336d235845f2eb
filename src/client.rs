//! Polling ticker client
//!
//! Owns the background poll loop and wires the source, store, highlight
//! tracker and health monitor together. Provides a singleton instance for easy
//! access throughout an application.

use crate::{
    constants::{MAX_RETRY_ATTEMPTS, POLL_INTERVAL_SECS, RETRY_DELAY_MS},
    error::{SourceError, TickerError},
    health::{HealthMonitor, PollHealth},
    highlight::PriceChangeTracker,
    source::TickerSource,
    sources::select_source,
    store::TickerStore,
    types::{TickerEvent, TickerSnapshot},
    view::{DisplayFields, WidgetView},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, OnceCell};
use tokio::time::sleep;

static GLOBAL_CLIENT: OnceCell<Arc<TickerClient>> = OnceCell::const_new();

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Live ticker polling client
///
/// Polls the configured source on a fixed interval and keeps the widget
/// state current. Fetches never overlap: each tick awaits the previous
/// attempt, including its retries.
///
/// # Example
/// ```no_run
/// use live_ticker_sdk::TickerClient;
///
/// # async fn example() {
/// let client = TickerClient::global().await;
/// println!("{}", client.view().await);
/// # }
/// ```
pub struct TickerClient {
    store: Arc<TickerStore>,
    source: Arc<dyn TickerSource>,
    highlight: Arc<PriceChangeTracker>,
    health: Arc<HealthMonitor>,
    events: broadcast::Sender<TickerEvent>,
}

impl Default for TickerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerClient {
    /// Returns the global singleton instance
    ///
    /// On first call, this initializes the client and starts the
    /// background polling task. Subsequent calls return the same
    /// instance.
    pub async fn global() -> Arc<Self> {
        GLOBAL_CLIENT
            .get_or_init(|| async {
                let client = Self::new();
                client.start_background_task();
                Arc::new(client)
            })
            .await
            .clone()
    }

    /// Creates a new client with the source selected from the
    /// `TICKER_SOURCE` environment variable
    ///
    /// This is primarily for testing. Use `global()` in production code.
    pub fn new() -> Self {
        Self::with_source(select_source())
    }

    /// Creates a new client with a custom source
    ///
    /// This is primarily for testing with scripted sources.
    pub fn with_source(source: Arc<dyn TickerSource>) -> Self {
        let store = Arc::new(TickerStore::new());
        let highlight = Arc::new(PriceChangeTracker::new());
        let health = Arc::new(HealthMonitor::new(source.source_name()));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            store,
            source,
            highlight,
            health,
            events,
        }
    }

    /// Starts the background polling task
    fn start_background_task(&self) {
        let store = self.store.clone();
        let source = self.source.clone();
        let highlight = self.highlight.clone();
        let health = self.health.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            tracing::info!(
                poll_interval_secs = POLL_INTERVAL_SECS,
                source = source.source_name(),
                "Starting ticker polling task"
            );

            loop {
                if let Err(e) =
                    Self::fetch_and_update(&source, &store, &highlight, &health, &events).await
                {
                    tracing::warn!(error = %e, "Failed to fetch ticker");
                }

                sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
            }
        });
    }

    /// One poll tick: bounded retry with a fixed delay, then store the
    /// snapshot or record the failure
    async fn fetch_and_update(
        source: &Arc<dyn TickerSource>,
        store: &Arc<TickerStore>,
        highlight: &Arc<PriceChangeTracker>,
        health: &Arc<HealthMonitor>,
        events: &broadcast::Sender<TickerEvent>,
    ) -> Result<(), SourceError> {
        let start = Instant::now();

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            match Self::fetch_snapshot(source).await {
                Ok(snapshot) => {
                    tracing::debug!(
                        last = %snapshot.last,
                        source = source.source_name(),
                        latency_ms = start.elapsed().as_millis() as u64,
                        "Successfully fetched ticker"
                    );

                    let old_price = highlight.previous_price().await;
                    highlight.observe(&snapshot.last).await;
                    store.apply_snapshot(snapshot.clone()).await;
                    health.record_success(start.elapsed()).await;
                    let _ = events.send(TickerEvent::price_updated(old_price, snapshot.last));
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt,
                        max_attempts = MAX_RETRY_ATTEMPTS,
                        error = %e,
                        "Failed to fetch ticker, retrying"
                    );

                    if attempt < MAX_RETRY_ATTEMPTS {
                        sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                    } else {
                        store.set_error(e.to_string()).await;
                        health.record_failure(&e.to_string()).await;
                        let _ = events.send(TickerEvent::fetch_failed(e.to_string()));
                        return Err(e);
                    }
                }
            }
        }

        Err(SourceError::invalid("Max retries exceeded"))
    }

    /// Fetches one response and extracts its single ticker record
    async fn fetch_snapshot(
        source: &Arc<dyn TickerSource>,
    ) -> Result<TickerSnapshot, SourceError> {
        let response = source.fetch_ticker().await?;
        response
            .ticker()
            .cloned()
            .ok_or_else(|| SourceError::invalid("Response contains no ticker records"))
    }

    /// The current widget view: loading, the error state, or the computed
    /// display fields
    ///
    /// A stale-but-present snapshot keeps rendering while the error state
    /// is set; the error line only takes over when nothing has ever
    /// loaded. Both states stay individually readable via
    /// [`error`](Self::error) and [`snapshot`](Self::snapshot).
    pub async fn view(&self) -> WidgetView {
        if let Some(snapshot) = self.store.snapshot().await {
            let fields = DisplayFields::from_snapshot(
                &snapshot,
                self.store.last_updated().await,
                self.highlight.is_highlighted(),
            );
            return WidgetView::Ready(fields);
        }

        match self.store.error().await {
            Some(message) => WidgetView::Error(message),
            None => WidgetView::Loading,
        }
    }

    /// The latest snapshot, regardless of staleness
    pub async fn snapshot(&self) -> Option<TickerSnapshot> {
        self.store.snapshot().await
    }

    /// The latest snapshot, failing when nothing is stored or the data is
    /// stale
    pub async fn fresh_snapshot(&self) -> Result<TickerSnapshot, TickerError> {
        self.store.fresh_snapshot().await
    }

    /// True until the first poll outcome lands
    pub async fn is_loading(&self) -> bool {
        self.store.is_loading().await
    }

    /// The current error message, if the last poll tick failed
    pub async fn error(&self) -> Option<String> {
        self.store.error().await
    }

    /// True while a recent price change is being highlighted
    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_highlighted()
    }

    /// True if the stored snapshot is stale or missing
    pub async fn is_stale(&self) -> bool {
        self.store.is_stale().await
    }

    /// Returns the name of the active source
    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// Subscribes to ticker events (price updates and fetch failures)
    pub fn subscribe(&self) -> broadcast::Receiver<TickerEvent> {
        self.events.subscribe()
    }

    /// Forces an immediate fetch, bypassing the polling interval
    pub async fn refresh_now(&self) -> Result<(), SourceError> {
        Self::fetch_and_update(
            &self.source,
            &self.store,
            &self.highlight,
            &self.health,
            &self.events,
        )
        .await
    }

    /// The current feed health readout (tick counts, failure streak,
    /// recent success rate, smoothed latency)
    pub async fn poll_health(&self) -> PollHealth {
        self.health.health().await
    }
}
