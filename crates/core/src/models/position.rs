use serde::{Deserialize, Serialize};

use super::token::Conviction;

/// One open trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub display_name: String,

    pub entry_price: f64,
    pub current_price: f64,
    pub stop_loss: f64,
    pub target_1: f64,
    pub target_2: f64,

    pub quantity: u32,
    pub invested_capital: f64,

    /// Market value; derived as current price × quantity when not sent.
    pub current_value: f64,

    pub unrealized_pnl: f64,
    pub unrealized_pnl_percent: f64,

    pub distance_to_stop_loss_percent: f64,
    pub distance_to_target_1_percent: f64,
    pub distance_to_target_2_percent: f64,

    pub days_held: u32,
    pub gtt_active: bool,

    pub strategy: String,
    pub sector: String,
    pub conviction: Option<Conviction>,

    /// Setup score; scale differs between schema versions.
    pub score: Option<f64>,
}
