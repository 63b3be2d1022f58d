use serde::{Deserialize, Serialize};

/// The three independent JSON documents the dashboard is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedKind {
    /// Portfolio, open positions, performance, risk and metadata.
    Primary,
    /// History of closed trades.
    ClosedTrades,
    /// Portfolio state document carrying the lessons learned.
    Lessons,
}

impl FeedKind {
    pub const ALL: [FeedKind; 3] = [FeedKind::Primary, FeedKind::ClosedTrades, FeedKind::Lessons];
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Primary => write!(f, "primary"),
            FeedKind::ClosedTrades => write!(f, "closed trades"),
            FeedKind::Lessons => write!(f, "lessons"),
        }
    }
}
