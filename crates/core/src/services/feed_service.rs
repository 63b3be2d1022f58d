use serde_json::Value;

use crate::errors::CoreError;
use crate::models::feed::FeedKind;
use crate::models::settings::FeedSettings;
use crate::providers::traits::FeedSource;

/// Raw results of one fetch round, one per endpoint.
///
/// Each endpoint succeeds or fails on its own.
#[derive(Debug)]
pub struct FeedBundle {
    pub primary: Result<Value, CoreError>,
    pub closed_trades: Result<Value, CoreError>,
    pub lessons: Result<Value, CoreError>,
}

/// Fetches the three feeds from a [`FeedSource`].
pub struct FeedService {
    source: Box<dyn FeedSource>,
}

impl FeedService {
    pub fn new(source: Box<dyn FeedSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch a single feed, logging the failure at this boundary.
    pub async fn fetch(&self, settings: &FeedSettings, kind: FeedKind) -> Result<Value, CoreError> {
        let path = settings.path_for(kind);
        tracing::debug!(source = self.source.name(), feed = %kind, path, "Fetching feed");
        let result = self.source.fetch(kind, path).await;
        if let Err(e) = &result {
            tracing::warn!(
                source = self.source.name(),
                feed = %kind,
                kind = %e.kind(),
                error = %e,
                "Feed fetch failed"
            );
        }
        result
    }

    /// Fetch all three feeds concurrently; they are independent read-only sources.
    pub async fn fetch_all(&self, settings: &FeedSettings) -> FeedBundle {
        let (primary, closed_trades, lessons) = tokio::join!(
            self.fetch(settings, FeedKind::Primary),
            self.fetch(settings, FeedKind::ClosedTrades),
            self.fetch(settings, FeedKind::Lessons),
        );
        FeedBundle {
            primary,
            closed_trades,
            lessons,
        }
    }
}
