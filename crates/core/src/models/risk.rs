use serde::{Deserialize, Serialize};

use super::token::StatusToken;

/// Risk limits and their current usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSnapshot {
    pub daily_loss_used: f64,
    pub daily_loss_limit: f64,
    pub current_drawdown_percent: f64,
    pub max_drawdown_limit_percent: f64,
    pub risk_status: StatusToken,

    /// Share of the daily loss limit already used (presentation only)
    pub daily_loss_percent: f64,

    /// Share of the drawdown limit already used (presentation only)
    pub drawdown_percent: f64,
}

impl RiskSnapshot {
    #[must_use]
    pub fn daily_loss_level(&self) -> GaugeLevel {
        GaugeLevel::from_percent(self.daily_loss_percent)
    }

    #[must_use]
    pub fn drawdown_level(&self) -> GaugeLevel {
        GaugeLevel::from_percent(self.drawdown_percent)
    }
}

/// Colour band of a usage gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaugeLevel {
    Safe,
    Warning,
    Danger,
}

impl GaugeLevel {
    /// Above 80 is danger, above 50 is warning.
    pub fn from_percent(percent: f64) -> Self {
        if percent > 80.0 {
            GaugeLevel::Danger
        } else if percent > 50.0 {
            GaugeLevel::Warning
        } else {
            GaugeLevel::Safe
        }
    }
}

impl std::fmt::Display for GaugeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GaugeLevel::Safe => write!(f, "safe"),
            GaugeLevel::Warning => write!(f, "warning"),
            GaugeLevel::Danger => write!(f, "danger"),
        }
    }
}
