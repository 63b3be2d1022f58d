use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;
use super::feed::FeedKind;

/// Endpoint paths and polling cadence.
///
/// Every field has a default, so an empty JSON object is a valid settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Path of the primary feed, relative to the source root.
    pub primary_path: String,

    /// Path of the closed-trades feed.
    pub closed_trades_path: String,

    /// Path of the portfolio state document that carries lessons learned.
    pub lessons_path: String,

    /// Seconds between two refresh triggers.
    pub refresh_interval_secs: u64,

    /// Per-request timeout for HTTP sources.
    pub request_timeout_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            primary_path: "trading_data.json".to_string(),
            closed_trades_path: "closed_trades.json".to_string(),
            lessons_path: "portfolio_state.json".to_string(),
            refresh_interval_secs: 60,
            request_timeout_secs: 30,
        }
    }
}

impl FeedSettings {
    /// Parse and validate settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: FeedSettings = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidSettings(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        for kind in FeedKind::ALL {
            if self.path_for(kind).trim().is_empty() {
                return Err(CoreError::InvalidSettings(format!(
                    "Path for the {kind} feed must not be empty"
                )));
            }
        }
        if self.refresh_interval_secs == 0 {
            return Err(CoreError::InvalidSettings(
                "refresh_interval_secs must be greater than zero".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidSettings(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn path_for(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::Primary => &self.primary_path,
            FeedKind::ClosedTrades => &self.closed_trades_path,
            FeedKind::Lessons => &self.lessons_path,
        }
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
