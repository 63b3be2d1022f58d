use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::feed::FeedKind;
use super::traits::{parse_body, FeedSource};

/// Fetches the feeds over HTTP(S) from a static site or API root.
///
/// Every request carries a `t=<unix millis>` query parameter so that
/// intermediate caches never serve a stale document.
pub struct HttpFeedSource {
    client: Client,
    base_url: Url,
}

impl HttpFeedSource {
    /// `base_url` is the directory the feed paths are relative to.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| CoreError::InvalidSettings(format!("Invalid base URL '{base_url}': {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Absolute URL for `path`, with the cache-busting parameter appended.
    pub fn feed_url(&self, path: &str, cache_buster: i64) -> Result<Url, CoreError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| CoreError::InvalidSettings(format!("Invalid feed path '{path}': {e}")))?;
        url.query_pairs_mut()
            .append_pair("t", &cache_buster.to_string());
        Ok(url)
    }
}

impl std::fmt::Debug for HttpFeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFeedSource")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch(&self, kind: FeedKind, path: &str) -> Result<Value, CoreError> {
        let url = self.feed_url(path, chrono::Utc::now().timestamp_millis())?;

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                feed: kind.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        tracing::debug!(feed = %kind, bytes = body.len(), "Feed received");
        parse_body(kind, &body)
    }
}
