//! An HTTP client for the upstream points-of-sale feed.

use pos_core::{models::RawFeedEntry, ports::{FeedSource, IngestPolicy}};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Where the feed is published by default.
pub const DEFAULT_FEED_URL: &str = "https://data.pid.cz/pointsOfSale/json/pointsOfSale.json";

/// Configuration for fetching and ingesting the feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// The URL the feed is fetched from
    #[serde(default = "default_url")]
    pub url: String,

    /// How long to wait for the whole response
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// What to do with entries whose opening hours do not parse
    #[serde(default)]
    pub policy: IngestPolicy,
}

fn default_url() -> String {
    DEFAULT_FEED_URL.to_owned()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
            policy: IngestPolicy::default(),
        }
    }
}

/// Failure to retrieve the feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request could not be sent, or the body could not be decoded
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("feed returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Fetches the feed over HTTP(S).
#[derive(Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    /// Build a client for the configured feed.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

impl FeedSource for HttpFeed {
    type Error = FeedError;

    async fn fetch(&self) -> Result<Vec<RawFeedEntry>, Self::Error> {
        tracing::debug!(url = %self.url, "fetching feed");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        Ok(response.json().await?)
    }
}
