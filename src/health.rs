//! Poll health tracking
//!
//! The widget surfaces a small health readout for its feed: lifetime tick
//! counts, the current failure streak, the success rate over the most
//! recent ticks, and a smoothed fetch latency. One reading per poll tick,
//! recorded by the client after the tick's retries settle.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::RwLock;

/// How many recent poll ticks the success-rate window covers
const WINDOW_TICKS: usize = 20;

/// Exponential smoothing factor for the fetch latency
const LATENCY_ALPHA: f64 = 0.2;

/// Point-in-time health readout for the polling feed
#[derive(Debug, Clone)]
pub struct PollHealth {
    /// Name of the active source
    pub source_name: String,
    /// Poll ticks run since startup
    pub total_ticks: u64,
    /// Poll ticks that exhausted their retries
    pub failed_ticks: u64,
    /// Length of the current unbroken run of failed ticks
    pub consecutive_failures: u32,
    /// Share of successful ticks over the recent window
    /// (1.0 before the first tick)
    pub window_success_rate: f64,
    /// Exponentially smoothed fetch latency in milliseconds
    /// (0.0 before the first successful tick)
    pub smoothed_latency_ms: f64,
    /// Message of the most recent failure, cleared by the next success
    pub last_error: Option<String>,
    /// When the most recent failure happened
    pub last_failure_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct HealthState {
    total_ticks: u64,
    failed_ticks: u64,
    consecutive_failures: u32,
    window: VecDeque<bool>,
    smoothed_latency_ms: Option<f64>,
    last_error: Option<String>,
    last_failure_at: Option<DateTime<Utc>>,
}

impl HealthState {
    fn push_outcome(&mut self, success: bool) {
        if self.window.len() >= WINDOW_TICKS {
            self.window.pop_front();
        }
        self.window.push_back(success);
        self.total_ticks += 1;
    }
}

/// Accumulates poll outcomes and serves the current readout
pub struct HealthMonitor {
    source_name: String,
    state: RwLock<HealthState>,
}

impl HealthMonitor {
    /// Creates a monitor with no recorded ticks
    pub fn new(source_name: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            state: RwLock::new(HealthState::default()),
        }
    }

    /// Records a successful poll tick and its fetch latency
    pub async fn record_success(&self, latency: Duration) {
        let latency_ms = latency.as_secs_f64() * 1000.0;

        let mut state = self.state.write().await;
        state.push_outcome(true);
        state.consecutive_failures = 0;
        state.last_error = None;
        state.smoothed_latency_ms = Some(match state.smoothed_latency_ms {
            Some(prev) => prev + LATENCY_ALPHA * (latency_ms - prev),
            None => latency_ms,
        });
    }

    /// Records a poll tick that exhausted its retries
    pub async fn record_failure(&self, error: &str) {
        let mut state = self.state.write().await;
        state.push_outcome(false);
        state.failed_ticks += 1;
        state.consecutive_failures += 1;
        state.last_error = Some(error.to_string());
        state.last_failure_at = Some(Utc::now());
    }

    /// The current health readout
    pub async fn health(&self) -> PollHealth {
        let state = self.state.read().await;

        let window_success_rate = if state.window.is_empty() {
            1.0
        } else {
            let successes = state.window.iter().filter(|ok| **ok).count();
            successes as f64 / state.window.len() as f64
        };

        PollHealth {
            source_name: self.source_name.clone(),
            total_ticks: state.total_ticks,
            failed_ticks: state.failed_ticks,
            consecutive_failures: state.consecutive_failures,
            window_success_rate,
            smoothed_latency_ms: state.smoothed_latency_ms.unwrap_or(0.0),
            last_error: state.last_error.clone(),
            last_failure_at: state.last_failure_at,
        }
    }
}
