//! Source abstraction for fetching the ticker from external endpoints

use crate::{error::SourceError, types::TickerResponse};
use async_trait::async_trait;

/// Trait for ticker data sources
///
/// Implementations fetch the ticker payload from somewhere (direct
/// endpoint, CORS relay rotation, synthetic mock).
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetches the current ticker response
    ///
    /// # Returns
    /// The full response envelope, already checked for application-level
    /// error payloads, or a normalized failure.
    async fn fetch_ticker(&self) -> Result<TickerResponse, SourceError>;

    /// Returns the name of this source
    fn source_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod scripted {
    use super::*;
    use crate::sources::mock::synthetic_response;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted source for testing: replays a queue of canned outcomes
    pub struct ScriptedSource {
        outcomes: Arc<Mutex<VecDeque<Result<TickerResponse, SourceError>>>>,
        call_count: Arc<Mutex<usize>>,
    }

    impl Default for ScriptedSource {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self {
                outcomes: Arc::new(Mutex::new(VecDeque::new())),
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        /// Queues a successful response with the given last price
        pub fn push_price(&self, last: &str) {
            let mut response = synthetic_response();
            response.tickers[0].last = last.to_string();
            self.outcomes.lock().unwrap().push_back(Ok(response));
        }

        /// Queues a failure outcome
        pub fn push_error(&self, error: SourceError) {
            self.outcomes.lock().unwrap().push_back(Err(error));
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl TickerSource for ScriptedSource {
        async fn fetch_ticker(&self) -> Result<TickerResponse, SourceError> {
            *self.call_count.lock().unwrap() += 1;
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SourceError::invalid("script exhausted")))
        }

        fn source_name(&self) -> &'static str {
            "scripted"
        }
    }
}
