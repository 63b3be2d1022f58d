pub mod errors;
pub mod models;
pub mod providers;
pub mod schema;
pub mod services;

use arc_swap::ArcSwap;
use models::{
    settings::FeedSettings,
    snapshot::{DashboardSnapshot, DashboardState, FeedFailure, RefreshOutcome},
};
use providers::{file::FileFeedSource, http::HttpFeedSource, traits::FeedSource};
use services::{feed_service::FeedService, normalizer_service::Normalizer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use errors::CoreError;

/// Main entry point for the dashboard core library.
///
/// Owns the feed source and the currently published [`DashboardState`].
/// Readers call [`TradingDashboard::state`] or [`TradingDashboard::snapshot`]
/// at any time and always get a complete state, never a partial one.
#[must_use]
pub struct TradingDashboard {
    settings: FeedSettings,
    feed_service: FeedService,
    normalizer: Normalizer,
    state: ArcSwap<DashboardState>,
    /// Held for the duration of a refresh cycle; cycles never overlap.
    refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for TradingDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.load();
        f.debug_struct("TradingDashboard")
            .field("source", &self.feed_service.source_name())
            .field("settings", &self.settings)
            .field("has_snapshot", &state.snapshot.is_some())
            .field("cycles", &state.cycles)
            .finish()
    }
}

impl TradingDashboard {
    /// Create a dashboard over any feed source. Settings are validated first.
    pub fn new(source: Box<dyn FeedSource>, settings: FeedSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            settings,
            feed_service: FeedService::new(source),
            normalizer: Normalizer::new(),
            state: ArcSwap::from_pointee(DashboardState::default()),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Fetch the feeds over HTTP, relative to `base_url`.
    pub fn over_http(base_url: &str, settings: FeedSettings) -> Result<Self, CoreError> {
        let source = HttpFeedSource::new(base_url, settings.request_timeout())?;
        Self::new(Box::new(source), settings)
    }

    /// Read the feeds from files under `root`.
    pub fn from_directory(root: impl Into<PathBuf>, settings: FeedSettings) -> Result<Self, CoreError> {
        Self::new(Box::new(FileFeedSource::new(root)), settings)
    }

    #[must_use]
    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    // ── Reading ─────────────────────────────────────────────────────

    /// The currently published state.
    #[must_use]
    pub fn state(&self) -> Arc<DashboardState> {
        self.state.load_full()
    }

    /// The last successfully built snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<DashboardSnapshot>> {
        self.state.load().snapshot.clone()
    }

    /// Failure of the most recent cycle, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<FeedFailure> {
        self.state.load().error.clone()
    }

    // ── Refresh cycle ───────────────────────────────────────────────

    /// Run one fetch-normalize-publish cycle.
    ///
    /// If another cycle is still in flight this returns
    /// [`RefreshOutcome::Skipped`] immediately. A failing primary feed keeps
    /// the previous snapshot and records the failure; failing secondary
    /// feeds only mark their own section unavailable.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            tracing::debug!("Refresh already in flight, skipping trigger");
            return RefreshOutcome::Skipped;
        };

        let bundle = self.feed_service.fetch_all(&self.settings).await;
        let previous = self.state.load_full();
        let cycles = previous.cycles + 1;

        let built = bundle.primary.and_then(|primary| {
            self.normalizer
                .normalize_snapshot(&primary, bundle.closed_trades, bundle.lessons)
        });

        match built {
            Ok(snapshot) => {
                tracing::info!(
                    cycles,
                    positions = snapshot.positions.len(),
                    closed_trades_ready = snapshot.closed_trades.is_ready(),
                    lessons_ready = snapshot.lessons.is_ready(),
                    last_updated = %snapshot.metadata.last_updated,
                    "Dashboard snapshot published"
                );
                self.state.store(Arc::new(DashboardState {
                    snapshot: Some(Arc::new(snapshot)),
                    error: None,
                    cycles,
                }));
                RefreshOutcome::Updated
            }
            Err(e) => {
                let failure = FeedFailure::from(&e);
                tracing::warn!(
                    cycles,
                    kind = %e.kind(),
                    error = %e,
                    kept_previous = previous.snapshot.is_some(),
                    "Primary feed failed, keeping previous snapshot"
                );
                self.state.store(Arc::new(DashboardState {
                    snapshot: previous.snapshot.clone(),
                    error: Some(failure.clone()),
                    cycles,
                }));
                RefreshOutcome::Retained(failure)
            }
        }
    }

    /// Refresh now and then every `refresh_interval_secs`, forever.
    ///
    /// Ticks that fall due while a cycle is running are skipped, not queued.
    pub async fn run_auto_refresh(&self) {
        let mut interval = tokio::time::interval(self.settings.refresh_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.refresh().await;
        }
    }

    /// Spawn [`TradingDashboard::run_auto_refresh`] on the current runtime.
    /// Abort the returned handle to stop polling.
    pub fn spawn_auto_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let dashboard = Arc::clone(self);
        tokio::spawn(async move { dashboard.run_auto_refresh().await })
    }
}
