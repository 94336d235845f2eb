//! In-memory view state for the ticker widget
//!
//! Holds exactly what the widget renders: the latest snapshot (replaced
//! wholesale on every successful fetch), a single normalized error
//! message, the initial loading flag and the last-update stamp.

use crate::{constants::STALE_THRESHOLD_SECS, error::TickerError, types::TickerSnapshot};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory store for the current ticker state
pub struct TickerStore {
    snapshot: RwLock<Option<TickerSnapshot>>,
    error: RwLock<Option<String>>,
    last_updated: RwLock<Option<DateTime<Utc>>>,
}

impl TickerStore {
    /// Creates an empty store in the loading state
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
            error: RwLock::new(None),
            last_updated: RwLock::new(None),
        }
    }

    /// Replaces the stored snapshot and clears any error state
    pub async fn apply_snapshot(&self, snapshot: TickerSnapshot) {
        tracing::debug!(last = %snapshot.last, "Storing ticker snapshot");

        *self.snapshot.write().await = Some(snapshot);
        *self.error.write().await = None;
        *self.last_updated.write().await = Some(Utc::now());
    }

    /// Records a fetch failure, keeping any previous snapshot in place
    pub async fn set_error(&self, message: impl Into<String>) {
        *self.error.write().await = Some(message.into());
    }

    /// The latest snapshot, regardless of staleness
    pub async fn snapshot(&self) -> Option<TickerSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// The latest snapshot, failing when nothing is stored or the data is
    /// older than the stale threshold
    pub async fn fresh_snapshot(&self) -> Result<TickerSnapshot, TickerError> {
        let snapshot = self
            .snapshot
            .read()
            .await
            .clone()
            .ok_or(TickerError::NotLoaded)?;

        let age = self.age().await.ok_or(TickerError::NotLoaded)?;
        if age.as_secs() > STALE_THRESHOLD_SECS {
            return Err(TickerError::stale(age));
        }

        Ok(snapshot)
    }

    /// The current error message, if the last poll tick failed
    pub async fn error(&self) -> Option<String> {
        self.error.read().await.clone()
    }

    /// True until the first poll outcome (snapshot or error) lands
    pub async fn is_loading(&self) -> bool {
        self.snapshot.read().await.is_none() && self.error.read().await.is_none()
    }

    /// When the last successful update happened
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        *self.last_updated.read().await
    }

    /// Age of the stored snapshot
    pub async fn age(&self) -> Option<Duration> {
        let last_updated = (*self.last_updated.read().await)?;
        let age = Utc::now().signed_duration_since(last_updated);
        Some(Duration::from_secs(age.num_seconds().max(0) as u64))
    }

    /// True if the stored snapshot is stale or missing
    pub async fn is_stale(&self) -> bool {
        match self.age().await {
            Some(age) => age.as_secs() > STALE_THRESHOLD_SECS,
            None => true,
        }
    }
}

impl Default for TickerStore {
    fn default() -> Self {
        Self::new()
    }
}
