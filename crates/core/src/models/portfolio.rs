use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Capital and P&L overview of the whole book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Capital allocated to the book ("pilot capital")
    pub total_capital: f64,

    /// Capital currently tied up in open positions
    pub deployed_capital: f64,

    /// Deployed share of total capital, 0–100 (may exceed 100; the UI clamps)
    pub deployed_percent: f64,

    /// Cash not deployed
    pub cash_available: f64,

    /// Number of open positions
    pub active_positions_count: u32,

    /// Position slots allowed
    pub max_positions: u32,

    /// Signed P&L; never clamped
    pub total_pnl: f64,

    /// Signed P&L percentage
    pub total_pnl_percent: f64,
}

/// Feed-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp exactly as the producer wrote it
    pub last_updated: String,

    /// Parsed form of `last_updated`, when it is a recognisable ISO timestamp
    pub last_updated_at: Option<DateTime<FixedOffset>>,
}
