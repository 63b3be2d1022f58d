use serde::{Deserialize, Serialize};

/// All-time trading statistics, computed upstream.
///
/// Optional figures stay `None` only when absent; a reported `0.0` is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_trades: u32,
    pub win_rate: Option<f64>,
    pub average_win: Option<f64>,
    pub average_loss: Option<f64>,
}

/// Per-strategy statistics, keyed by strategy name in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyStat {
    pub name: String,
    pub total_trades: u32,
    pub win_rate: Option<f64>,
    pub total_pnl: f64,
}
