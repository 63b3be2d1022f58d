use serde_json::json;
use swing_dashboard_core::errors::{CoreError, ErrorKind};
use swing_dashboard_core::models::feed::FeedKind;
use swing_dashboard_core::models::risk::GaugeLevel;
use swing_dashboard_core::models::settings::FeedSettings;
use swing_dashboard_core::models::snapshot::{FeedFailure, Section};
use swing_dashboard_core::models::token::{Conviction, StatusToken};
use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════
//  StatusToken
// ═══════════════════════════════════════════════════════════════════

mod status_token {
    use super::*;

    #[test]
    fn raw_is_kept() {
        assert_eq!(StatusToken::new("STOP_LOSS_HIT").as_str(), "STOP_LOSS_HIT");
        assert_eq!(StatusToken::new("STOP_LOSS_HIT").to_string(), "STOP_LOSS_HIT");
    }

    #[test]
    fn label_replaces_every_underscore() {
        assert_eq!(StatusToken::new("TARGET_1_HIT").label(), "TARGET 1 HIT");
        assert_eq!(StatusToken::new("ALL_CLEAR").label(), "ALL CLEAR");
        assert_eq!(StatusToken::new("MANUAL").label(), "MANUAL");
    }

    #[test]
    fn title_case() {
        assert_eq!(StatusToken::new("ALL_CLEAR").title(), "All Clear");
        assert_eq!(StatusToken::new("stop_loss_hit").title(), "Stop Loss Hit");
        assert_eq!(StatusToken::new("").title(), "");
    }

    #[test]
    fn slug_is_lowercase() {
        assert_eq!(StatusToken::new("ALL_CLEAR").slug(), "all_clear");
    }

    #[test]
    fn serde_is_transparent_string() {
        let token = StatusToken::new("WARNING");
        assert_eq!(serde_json::to_value(&token).unwrap(), json!("WARNING"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Conviction
// ═══════════════════════════════════════════════════════════════════

mod conviction {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Conviction::parse("high"), Conviction::High);
        assert_eq!(Conviction::parse("Medium"), Conviction::Medium);
        assert_eq!(Conviction::parse(" LOW "), Conviction::Low);
    }

    #[test]
    fn unknown_tier_kept_trimmed() {
        assert_eq!(
            Conviction::parse(" Very High "),
            Conviction::Other("Very High".into())
        );
    }

    #[test]
    fn display() {
        assert_eq!(Conviction::High.to_string(), "High");
        assert_eq!(Conviction::Other("Speculative".into()).to_string(), "Speculative");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  GaugeLevel
// ═══════════════════════════════════════════════════════════════════

mod gauge_level {
    use super::*;

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(GaugeLevel::from_percent(0.0), GaugeLevel::Safe);
        assert_eq!(GaugeLevel::from_percent(50.0), GaugeLevel::Safe);
        assert_eq!(GaugeLevel::from_percent(50.1), GaugeLevel::Warning);
        assert_eq!(GaugeLevel::from_percent(80.0), GaugeLevel::Warning);
        assert_eq!(GaugeLevel::from_percent(80.1), GaugeLevel::Danger);
        assert_eq!(GaugeLevel::from_percent(140.0), GaugeLevel::Danger);
    }

    #[test]
    fn negative_is_safe() {
        assert_eq!(GaugeLevel::from_percent(-10.0), GaugeLevel::Safe);
    }

    #[test]
    fn display() {
        assert_eq!(GaugeLevel::Danger.to_string(), "danger");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FeedKind
// ═══════════════════════════════════════════════════════════════════

mod feed_kind {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(FeedKind::Primary.to_string(), "primary");
        assert_eq!(FeedKind::ClosedTrades.to_string(), "closed trades");
        assert_eq!(FeedKind::Lessons.to_string(), "lessons");
    }

    #[test]
    fn all_lists_each_feed_once() {
        assert_eq!(FeedKind::ALL.len(), 3);
        assert!(FeedKind::ALL.contains(&FeedKind::ClosedTrades));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FeedSettings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = FeedSettings::default();
        assert_eq!(s.primary_path, "trading_data.json");
        assert_eq!(s.closed_trades_path, "closed_trades.json");
        assert_eq!(s.lessons_path, "portfolio_state.json");
        assert_eq!(s.refresh_interval(), Duration::from_secs(60));
        assert_eq!(s.request_timeout(), Duration::from_secs(30));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn empty_object_is_valid() {
        let s = FeedSettings::from_json("{}").unwrap();
        assert_eq!(s, FeedSettings::default());
    }

    #[test]
    fn partial_override() {
        let s = FeedSettings::from_json(r#"{"primary_path": "v3/data.json", "refresh_interval_secs": 15}"#)
            .unwrap();
        assert_eq!(s.path_for(FeedKind::Primary), "v3/data.json");
        assert_eq!(s.path_for(FeedKind::Lessons), "portfolio_state.json");
        assert_eq!(s.refresh_interval_secs, 15);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = FeedSettings::from_json("{oops").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("Failed to parse settings"));
    }

    #[test]
    fn empty_path_rejected() {
        let s = FeedSettings {
            closed_trades_path: "  ".into(),
            ..FeedSettings::default()
        };
        let err = s.validate().unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidSettings(ref m) if m == "Path for the closed trades feed must not be empty")
        );
    }

    #[test]
    fn zero_interval_rejected() {
        let err = FeedSettings::from_json(r#"{"refresh_interval_secs": 0}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSettings(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        let s = FeedSettings {
            request_timeout_secs: 0,
            ..FeedSettings::default()
        };
        assert!(s.validate().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Section
// ═══════════════════════════════════════════════════════════════════

mod section {
    use super::*;

    #[test]
    fn from_ok_is_ready() {
        let s: Section<Vec<u32>> = Ok(vec![]).into();
        assert!(s.is_ready());
        assert_eq!(s.ready(), Some(&vec![]));
        assert!(s.failure().is_none());
    }

    #[test]
    fn from_err_is_unavailable() {
        let s: Section<Vec<u32>> = Err(CoreError::Parse {
            feed: "lessons".into(),
            message: "trailing comma".into(),
        })
        .into();
        assert!(!s.is_ready());
        assert!(s.ready().is_none());
        assert_eq!(
            s.failure(),
            Some(&FeedFailure::new(
                ErrorKind::Parse,
                "Failed to parse lessons feed: trailing comma"
            ))
        );
    }

    #[test]
    fn empty_ready_differs_from_unavailable() {
        let ready: Section<Vec<u32>> = Section::Ready(vec![]);
        let unavailable: Section<Vec<u32>> =
            Section::Unavailable(FeedFailure::new(ErrorKind::Transport, "down"));
        assert_ne!(ready, unavailable);
    }
}
