use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::feed::FeedKind;

/// Trait abstraction for anything that can hand out the raw feed documents.
///
/// The refresh cycle only sees parsed JSON; where it came from (HTTP,
/// a local directory, a test double) is up to the implementation.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch and parse one feed document.
    ///
    /// Transport failures map to `Network`/`HttpStatus`/`FileIO`,
    /// an unparsable body to `Parse`.
    async fn fetch(&self, kind: FeedKind, path: &str) -> Result<Value, CoreError>;
}

/// Parse a feed body, attributing failures to the feed.
pub(crate) fn parse_body(kind: FeedKind, body: &str) -> Result<Value, CoreError> {
    serde_json::from_str(body).map_err(|e| CoreError::Parse {
        feed: kind.to_string(),
        message: e.to_string(),
    })
}
