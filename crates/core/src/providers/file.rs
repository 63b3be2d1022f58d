use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

use crate::errors::CoreError;
use crate::models::feed::FeedKind;
use super::traits::{parse_body, FeedSource};

/// Reads the feeds from a local directory, e.g. a checkout of the
/// static site the producer scripts publish to.
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    root: PathBuf,
}

impl FileFeedSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    fn name(&self) -> &str {
        "File"
    }

    async fn fetch(&self, kind: FeedKind, path: &str) -> Result<Value, CoreError> {
        let full = self.root.join(path.trim_start_matches('/'));
        let body = tokio::fs::read_to_string(&full).await.map_err(|e| {
            CoreError::FileIO(format!("Failed to read {kind} feed at {}: {e}", full.display()))
        })?;
        parse_body(kind, &body)
    }
}
