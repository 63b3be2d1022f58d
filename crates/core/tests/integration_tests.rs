use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use swing_dashboard_core::errors::CoreError;
use swing_dashboard_core::models::feed::FeedKind;
use swing_dashboard_core::models::settings::FeedSettings;
use swing_dashboard_core::models::snapshot::{RefreshOutcome, Section};
use swing_dashboard_core::providers::traits::FeedSource;
use swing_dashboard_core::TradingDashboard;

// ═══════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════

fn primary_doc(last_updated: &str) -> Value {
    json!({
        "portfolio": {
            "pilot_capital": 500000,
            "deployed_capital": 150000,
            "available_cash": 350000,
            "active_positions_count": 1,
            "max_positions": 10,
            "total_unrealized_pnl": 460,
            "total_unrealized_pnl_percent": 0.09
        },
        "active_positions": [{
            "stock": "HINDZINC",
            "stock_name": "Hindustan Zinc",
            "entry_price": 310.5,
            "current_price": 322.0,
            "quantity": 40,
            "unrealized_pnl": 460.0,
            "pnl_percent": 3.7,
            "gtt_active": true
        }],
        "performance_metrics": {"all_time": {"total_trades": 1, "win_rate": 0}},
        "risk_metrics": {"daily_loss_used": 600, "risk_status": "ALL_CLEAR"},
        "metadata": {"last_updated": last_updated}
    })
}

fn closed_doc() -> Value {
    json!({"closed_trades": [{
        "stock": "HINDCOPPER",
        "entry_date": "2024-01-02",
        "exit_date": "2024-01-09",
        "realized_pnl": -600.0,
        "exit_type": "STOP_LOSS_HIT"
    }]})
}

fn lessons_doc() -> Value {
    json!({"lessons_learned": {"mistakes_to_avoid": [{
        "mistake_description": "Chased a gap up",
        "checklist_before_entry": ["✓ Gap below 2%"]
    }]}})
}

// ═══════════════════════════════════════════════════════════════════
// Mock Feed Sources (for testing without real endpoints)
// ═══════════════════════════════════════════════════════════════════

/// Serves fixed documents; individual feeds can be switched to failing.
struct MockFeedSource {
    primary_ok: Arc<AtomicBool>,
    closed_status: Option<u16>,
    calls: Arc<AtomicUsize>,
    stamp: Arc<AtomicUsize>,
}

impl MockFeedSource {
    fn healthy() -> Self {
        Self {
            primary_ok: Arc::new(AtomicBool::new(true)),
            closed_status: None,
            calls: Arc::new(AtomicUsize::new(0)),
            stamp: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn fetch(&self, kind: FeedKind, _path: &str) -> Result<Value, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match kind {
            FeedKind::Primary => {
                if !self.primary_ok.load(Ordering::SeqCst) {
                    return Err(CoreError::Network("connection reset".into()));
                }
                let n = self.stamp.fetch_add(1, Ordering::SeqCst);
                Ok(primary_doc(&format!("2024-01-15T10:{n:02}:00+05:30")))
            }
            FeedKind::ClosedTrades => match self.closed_status {
                Some(status) => Err(CoreError::HttpStatus {
                    feed: kind.to_string(),
                    status,
                }),
                None => Ok(closed_doc()),
            },
            FeedKind::Lessons => Ok(lessons_doc()),
        }
    }
}

/// Blocks the primary fetch until released, to hold a cycle in flight.
struct GatedFeedSource {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl FeedSource for GatedFeedSource {
    fn name(&self) -> &str {
        "Gated"
    }

    async fn fetch(&self, kind: FeedKind, _path: &str) -> Result<Value, CoreError> {
        match kind {
            FeedKind::Primary => {
                self.entered.notify_one();
                self.release.notified().await;
                Ok(primary_doc("2024-01-15T10:00:00+05:30"))
            }
            FeedKind::ClosedTrades => Ok(closed_doc()),
            FeedKind::Lessons => Ok(lessons_doc()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Refresh cycle
// ═══════════════════════════════════════════════════════════════════

mod refresh_cycle {
    use super::*;

    #[tokio::test]
    async fn no_snapshot_before_first_refresh() {
        let dashboard =
            TradingDashboard::new(Box::new(MockFeedSource::healthy()), FeedSettings::default())
                .unwrap();
        assert!(dashboard.snapshot().is_none());
        assert!(dashboard.last_error().is_none());
        assert_eq!(dashboard.state().cycles, 0);
    }

    #[tokio::test]
    async fn successful_cycle_publishes_full_snapshot() {
        let source = MockFeedSource::healthy();
        let calls = Arc::clone(&source.calls);
        let dashboard = TradingDashboard::new(Box::new(source), FeedSettings::default()).unwrap();

        assert_eq!(dashboard.refresh().await, RefreshOutcome::Updated);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let snap = dashboard.snapshot().unwrap();
        assert_eq!(snap.portfolio.deployed_percent, 30.0);
        assert_eq!(snap.positions.len(), 1);
        assert_eq!(snap.positions[0].current_value, 12_880.0);
        assert_eq!(snap.performance.win_rate, Some(0.0));
        assert_eq!(snap.risk.daily_loss_percent, 6.0);
        assert_eq!(snap.closed_trades.ready().map(Vec::len), Some(1));
        assert_eq!(
            snap.lessons.ready().unwrap()[0].checklist_before_entry,
            vec!["Gap below 2%"]
        );
        assert_eq!(dashboard.state().cycles, 1);
    }

    #[tokio::test]
    async fn closed_trades_500_only_marks_that_section() {
        let source = MockFeedSource {
            closed_status: Some(500),
            ..MockFeedSource::healthy()
        };
        let dashboard = TradingDashboard::new(Box::new(source), FeedSettings::default()).unwrap();

        assert_eq!(dashboard.refresh().await, RefreshOutcome::Updated);
        let snap = dashboard.snapshot().unwrap();
        assert!(matches!(snap.closed_trades, Section::Unavailable(ref f) if f.kind == "transport"));
        assert!(snap.lessons.is_ready());
        assert_eq!(snap.portfolio.total_capital, 500_000.0);
        assert!(dashboard.last_error().is_none());
    }

    #[tokio::test]
    async fn primary_failure_retains_previous_snapshot() {
        let source = MockFeedSource::healthy();
        let primary_ok = Arc::clone(&source.primary_ok);
        let dashboard = TradingDashboard::new(Box::new(source), FeedSettings::default()).unwrap();

        assert_eq!(dashboard.refresh().await, RefreshOutcome::Updated);
        let before = dashboard.snapshot().unwrap();

        primary_ok.store(false, Ordering::SeqCst);
        let failure = match dashboard.refresh().await {
            RefreshOutcome::Retained(failure) => failure,
            other => panic!("expected Retained, got {other:?}"),
        };
        assert_eq!(failure.kind, "transport");

        let after = dashboard.snapshot().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(dashboard.last_error(), Some(failure));
        assert_eq!(dashboard.state().cycles, 2);

        primary_ok.store(true, Ordering::SeqCst);
        assert_eq!(dashboard.refresh().await, RefreshOutcome::Updated);
        assert!(dashboard.last_error().is_none());
        assert_eq!(
            dashboard.snapshot().unwrap().metadata.last_updated,
            "2024-01-15T10:01:00+05:30"
        );
    }

    #[tokio::test]
    async fn primary_failure_without_previous_snapshot() {
        let source = MockFeedSource::healthy();
        source.primary_ok.store(false, Ordering::SeqCst);
        let dashboard = TradingDashboard::new(Box::new(source), FeedSettings::default()).unwrap();

        assert!(matches!(dashboard.refresh().await, RefreshOutcome::Retained(_)));
        let state = dashboard.state();
        assert!(state.snapshot.is_none());
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn published_snapshot_is_not_mutated_by_later_cycles() {
        let dashboard =
            TradingDashboard::new(Box::new(MockFeedSource::healthy()), FeedSettings::default())
                .unwrap();
        dashboard.refresh().await;
        let held = dashboard.snapshot().unwrap();
        dashboard.refresh().await;

        assert_eq!(held.metadata.last_updated, "2024-01-15T10:00:00+05:30");
        assert_eq!(
            dashboard.snapshot().unwrap().metadata.last_updated,
            "2024-01-15T10:01:00+05:30"
        );
    }

    #[tokio::test]
    async fn overlapping_trigger_is_skipped() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let source = GatedFeedSource {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        };
        let dashboard =
            Arc::new(TradingDashboard::new(Box::new(source), FeedSettings::default()).unwrap());

        let in_flight = {
            let dashboard = Arc::clone(&dashboard);
            tokio::spawn(async move { dashboard.refresh().await })
        };
        entered.notified().await;

        assert_eq!(dashboard.refresh().await, RefreshOutcome::Skipped);
        assert_eq!(dashboard.state().cycles, 0);

        release.notify_one();
        assert_eq!(in_flight.await.unwrap(), RefreshOutcome::Updated);
        assert_eq!(dashboard.state().cycles, 1);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = FeedSettings {
            refresh_interval_secs: 0,
            ..FeedSettings::default()
        };
        let err = TradingDashboard::new(Box::new(MockFeedSource::healthy()), settings).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
    }

    #[test]
    fn debug_shows_source_and_cycles() {
        let dashboard =
            TradingDashboard::new(Box::new(MockFeedSource::healthy()), FeedSettings::default())
                .unwrap();
        let out = format!("{dashboard:?}");
        assert!(out.contains("Mock"));
        assert!(out.contains("cycles: 0"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Auto refresh & file-backed dashboard
// ═══════════════════════════════════════════════════════════════════

mod end_to_end {
    use super::*;

    #[tokio::test]
    async fn auto_refresh_runs_first_cycle_immediately() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("swing_dashboard_core=debug")
            .with_test_writer()
            .try_init();

        let dashboard = Arc::new(
            TradingDashboard::new(Box::new(MockFeedSource::healthy()), FeedSettings::default())
                .unwrap(),
        );
        let handle = dashboard.spawn_auto_refresh();

        let published = tokio::time::timeout(Duration::from_secs(5), async {
            while dashboard.snapshot().is_none() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        handle.abort();

        assert!(published.is_ok());
        assert_eq!(dashboard.state().cycles, 1);
    }

    #[tokio::test]
    async fn from_directory_reads_all_three_feeds() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("trading_data.json"),
            primary_doc("2024-01-15T10:00:00").to_string(),
        )
        .unwrap();
        std::fs::write(dir.path().join("closed_trades.json"), closed_doc().to_string()).unwrap();

        let dashboard = TradingDashboard::from_directory(dir.path(), FeedSettings::default()).unwrap();
        assert_eq!(dashboard.refresh().await, RefreshOutcome::Updated);

        let snap = dashboard.snapshot().unwrap();
        assert!(snap.metadata.last_updated_at.is_some());
        assert_eq!(snap.closed_trades.ready().unwrap()[0].symbol, "HINDCOPPER");
        // portfolio_state.json was never written
        assert_eq!(snap.lessons.failure().unwrap().kind, "transport");
    }

    #[tokio::test]
    async fn from_directory_with_corrupt_primary_keeps_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("trading_data.json"), "{").unwrap();

        let dashboard = TradingDashboard::from_directory(dir.path(), FeedSettings::default()).unwrap();
        let outcome = dashboard.refresh().await;
        assert!(matches!(outcome, RefreshOutcome::Retained(ref f) if f.kind == "parse"));
        assert!(dashboard.snapshot().is_none());
    }

    #[test]
    fn over_http_rejects_bad_base_url() {
        let err = TradingDashboard::over_http("::nope::", FeedSettings::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
    }
}
