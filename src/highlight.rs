//! Price-change highlight tracking
//!
//! Compares each newly fetched last price to the previously observed one
//! and raises a transient highlight flag on change. The scheduled reset
//! is cancellable: a rapid follow-up change aborts the pending reset and
//! schedules a fresh one, so the flag always stays on for the full
//! duration after the most recent change.

use crate::constants::HIGHLIGHT_DURATION_MS;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Tracks price changes and drives the highlight flag
pub struct PriceChangeTracker {
    prev_price: Mutex<Option<String>>,
    highlight: Arc<AtomicBool>,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl PriceChangeTracker {
    /// Creates a tracker with no observed price and the flag off
    pub fn new() -> Self {
        Self {
            prev_price: Mutex::new(None),
            highlight: Arc::new(AtomicBool::new(false)),
            reset_task: Mutex::new(None),
        }
    }

    /// Observes a newly fetched last price
    ///
    /// The comparison is on the raw price string as published by the
    /// feed, so "54.40" and "54.4" count as a change.
    pub async fn observe(&self, new_price: &str) {
        let mut prev = self.prev_price.lock().await;
        let changed = prev.as_deref().is_some_and(|p| p != new_price);

        if changed {
            self.highlight.store(true, Ordering::SeqCst);
            self.schedule_reset().await;
        }

        *prev = Some(new_price.to_string());
    }

    /// True while a recent price change is being highlighted
    pub fn is_highlighted(&self) -> bool {
        self.highlight.load(Ordering::SeqCst)
    }

    /// The most recently observed price, if any
    pub async fn previous_price(&self) -> Option<String> {
        self.prev_price.lock().await.clone()
    }

    /// Replaces any pending reset with a fresh one
    async fn schedule_reset(&self) {
        let mut task = self.reset_task.lock().await;
        if let Some(pending) = task.take() {
            pending.abort();
        }

        let flag = self.highlight.clone();
        *task = Some(tokio::spawn(async move {
            sleep(Duration::from_millis(HIGHLIGHT_DURATION_MS)).await;
            flag.store(false, Ordering::SeqCst);
        }));
    }
}

impl Default for PriceChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        // Let the spawned reset task run after the clock moves
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_observation_never_highlights() {
        let tracker = PriceChangeTracker::new();
        tracker.observe("54.4").await;
        assert!(!tracker.is_highlighted());
        assert_eq!(tracker.previous_price().await.as_deref(), Some("54.4"));
    }

    #[tokio::test(start_paused = true)]
    async fn change_highlights_then_clears_after_duration() {
        let tracker = PriceChangeTracker::new();
        tracker.observe("54.4").await;
        tracker.observe("54.5").await;
        assert!(tracker.is_highlighted());
        settle().await;

        tokio::time::advance(Duration::from_millis(HIGHLIGHT_DURATION_MS - 1)).await;
        settle().await;
        assert!(tracker.is_highlighted());

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert!(!tracker.is_highlighted());
    }

    #[tokio::test(start_paused = true)]
    async fn equal_price_leaves_flag_unchanged() {
        let tracker = PriceChangeTracker::new();
        tracker.observe("54.4").await;
        tracker.observe("54.4").await;
        assert!(!tracker.is_highlighted());

        tracker.observe("54.5").await;
        tracker.observe("54.5").await;
        assert!(tracker.is_highlighted());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_change_replaces_pending_reset() {
        let tracker = PriceChangeTracker::new();
        tracker.observe("54.4").await;
        tracker.observe("54.5").await;
        settle().await;

        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        tracker.observe("54.6").await;
        settle().await;

        // The first reset would have fired here; it was aborted
        tokio::time::advance(Duration::from_millis(600)).await;
        settle().await;
        assert!(tracker.is_highlighted());

        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
        assert!(!tracker.is_highlighted());
    }

    #[tokio::test(start_paused = true)]
    async fn string_comparison_treats_reformat_as_change() {
        let tracker = PriceChangeTracker::new();
        tracker.observe("54.4").await;
        tracker.observe("54.40").await;
        assert!(tracker.is_highlighted());
    }
}
