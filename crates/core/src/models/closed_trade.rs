use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::token::StatusToken;

/// A finished trade. Immutable once reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub symbol: String,
    pub display_name: String,
    pub entry_date: Option<NaiveDate>,
    pub exit_date: Option<NaiveDate>,
    pub holding_days: u32,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: u32,
    pub realized_pnl: f64,
    pub realized_pnl_percent: f64,
    pub exit_type: Option<StatusToken>,
    pub strategy: String,
    pub sector: String,

    /// Post-trade review; `None` when the producer did not write one.
    pub analysis: Option<TradeAnalysis>,
}

/// Ordered review notes attached to a closed trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeAnalysis {
    pub what_worked: Vec<String>,
    pub what_didnt: Vec<String>,
    pub key_learnings: Vec<String>,
}
