//! CORS relay rotation source implementation

use crate::{
    constants::{RELAY_URLS, REQUEST_TIMEOUT_SECS, USER_AGENT},
    error::SourceError,
    source::TickerSource,
    types::TickerResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::RwLock;

/// One GET against a single mirror URL
///
/// Seam between the rotation logic and the HTTP layer, so the walk and
/// pinning behavior can be exercised without a network.
#[async_trait]
trait MirrorTransport: Send + Sync {
    async fn get_ticker(&self, url: &str) -> Result<TickerResponse, SourceError>;
}

struct HttpTransport {
    client: Client,
}

#[async_trait]
impl MirrorTransport for HttpTransport {
    async fn get_ticker(&self, url: &str) -> Result<TickerResponse, SourceError> {
        super::request_ticker(&self.client, url).await
    }
}

/// Fetches the ticker through an ordered list of public CORS relay
/// mirrors
///
/// The rotation cursor pins to whichever mirror last succeeded, so a
/// healthy mirror keeps serving every poll. One fetch walks the list from
/// the cursor; if every candidate fails it returns
/// [`SourceError::Exhausted`] carrying the last underlying failure.
pub struct RelaySource {
    transport: Box<dyn MirrorTransport>,
    candidates: Vec<String>,
    cursor: RwLock<usize>,
}

impl RelaySource {
    /// Creates a relay source over the default mirror list
    pub fn new() -> Result<Self, SourceError> {
        Self::with_candidates(RELAY_URLS.iter().map(|u| u.to_string()).collect())
    }

    /// Creates a relay source over an explicit ordered candidate list
    pub fn with_candidates(candidates: Vec<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(SourceError::NetworkError)?;

        Ok(Self::with_transport(
            candidates,
            Box::new(HttpTransport { client }),
        ))
    }

    fn with_transport(candidates: Vec<String>, transport: Box<dyn MirrorTransport>) -> Self {
        Self {
            transport,
            candidates,
            cursor: RwLock::new(0),
        }
    }

    /// The mirror the rotation is currently pinned to
    pub async fn current_candidate(&self) -> Option<String> {
        let cursor = *self.cursor.read().await;
        self.candidates.get(cursor).cloned()
    }
}

impl Default for RelaySource {
    fn default() -> Self {
        Self::new().expect("Failed to create relay ticker source")
    }
}

#[async_trait]
impl TickerSource for RelaySource {
    async fn fetch_ticker(&self) -> Result<TickerResponse, SourceError> {
        if self.candidates.is_empty() {
            return Err(SourceError::exhausted("No relay mirrors configured"));
        }

        let start = *self.cursor.read().await;
        let mut last_error: Option<SourceError> = None;

        for offset in 0..self.candidates.len() {
            let index = (start + offset) % self.candidates.len();
            let url = &self.candidates[index];

            tracing::debug!(
                mirror = index + 1,
                mirrors = self.candidates.len(),
                url = %url,
                "Fetching ticker via relay mirror"
            );

            match self.transport.get_ticker(url).await {
                Ok(response) => {
                    // Pin the rotation to the working mirror
                    *self.cursor.write().await = index;
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!(
                        mirror = index + 1,
                        mirrors = self.candidates.len(),
                        error = %e,
                        "Relay mirror failed, advancing rotation"
                    );
                    last_error = Some(e);
                }
            }
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no mirrors attempted".to_string());
        Err(SourceError::exhausted(reason))
    }

    fn source_name(&self) -> &'static str {
        "relay"
    }
}
