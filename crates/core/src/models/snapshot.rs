use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{CoreError, ErrorKind};
use super::closed_trade::ClosedTrade;
use super::lesson::Lesson;
use super::performance::{PerformanceSummary, StrategyStat};
use super::portfolio::{Metadata, PortfolioSummary};
use super::position::Position;
use super::risk::RiskSnapshot;

/// Why a feed-backed section could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFailure {
    pub kind: String,
    pub message: String,
}

impl FeedFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.into(),
        }
    }
}

impl From<&CoreError> for FeedFailure {
    fn from(e: &CoreError) -> Self {
        FeedFailure::new(e.kind(), e.to_string())
    }
}

/// A section fed by its own endpoint.
///
/// `Ready` with an empty collection is the explicit empty state;
/// `Unavailable` means the feed itself failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Section<T> {
    Ready(T),
    Unavailable(FeedFailure),
}

impl<T> Section<T> {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            Section::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FeedFailure> {
        match self {
            Section::Ready(_) => None,
            Section::Unavailable(failure) => Some(failure),
        }
    }
}

impl<T> From<Result<T, CoreError>> for Section<T> {
    fn from(result: Result<T, CoreError>) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(e) => Section::Unavailable(FeedFailure::from(&e)),
        }
    }
}

/// Everything the primary feed contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryView {
    pub metadata: Metadata,
    pub portfolio: PortfolioSummary,
    pub positions: Vec<Position>,
    pub performance: PerformanceSummary,
    pub strategies: Vec<StrategyStat>,
    pub risk: RiskSnapshot,
}

/// The complete, immutable view-model handed to the renderer.
///
/// Built fresh on every refresh cycle and replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub metadata: Metadata,
    pub portfolio: PortfolioSummary,
    pub positions: Vec<Position>,
    pub performance: PerformanceSummary,
    pub strategies: Vec<StrategyStat>,
    pub risk: RiskSnapshot,
    pub closed_trades: Section<Vec<ClosedTrade>>,
    pub lessons: Section<Vec<Lesson>>,
}

impl DashboardSnapshot {
    pub fn assemble(
        primary: PrimaryView,
        closed_trades: Section<Vec<ClosedTrade>>,
        lessons: Section<Vec<Lesson>>,
    ) -> Self {
        Self {
            metadata: primary.metadata,
            portfolio: primary.portfolio,
            positions: primary.positions,
            performance: primary.performance,
            strategies: primary.strategies,
            risk: primary.risk,
            closed_trades,
            lessons,
        }
    }
}

/// What readers load: the last good snapshot plus the latest cycle's error.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Last successfully built snapshot, `None` until the first success.
    pub snapshot: Option<Arc<DashboardSnapshot>>,

    /// Failure of the most recent cycle, cleared by the next success.
    pub error: Option<FeedFailure>,

    /// Number of completed cycles, successful or not.
    pub cycles: u64,
}

/// Result of a single refresh trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// A new snapshot was published.
    Updated,
    /// The primary feed failed; the previous snapshot was kept.
    Retained(FeedFailure),
    /// Another refresh was still in flight; nothing was done.
    Skipped,
}
