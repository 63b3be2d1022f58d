use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::models::closed_trade::{ClosedTrade, TradeAnalysis};
use crate::models::lesson::Lesson;
use crate::models::performance::{PerformanceSummary, StrategyStat};
use crate::models::portfolio::{Metadata, PortfolioSummary};
use crate::models::position::Position;
use crate::models::risk::RiskSnapshot;
use crate::models::snapshot::{DashboardSnapshot, PrimaryView, Section};
use crate::models::token::{Conviction, StatusToken};
use crate::schema::derivation::{Derivation, DerivationEngine};
use crate::schema::fields::{closed_trade, lesson, metadata, performance, portfolio, position, risk, root};
use crate::schema::resolver::{FieldResolver, FieldSpec, FieldValue};

/// Maps raw feed documents onto the stable view-model.
///
/// Stateless and pure: the same input always yields an identical output.
/// Field aliases and defaults come from [`crate::schema::fields`]; missing
/// derivable attributes are filled by the [`DerivationEngine`].
pub struct Normalizer {
    derivations: DerivationEngine,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            derivations: DerivationEngine::new(),
        }
    }

    /// Build a full snapshot from the three feed results.
    ///
    /// The primary feed must normalize; the other two degrade to
    /// [`Section::Unavailable`] on any failure of their own.
    pub fn normalize_snapshot(
        &self,
        primary: &Value,
        closed_trades: Result<Value, CoreError>,
        lessons: Result<Value, CoreError>,
    ) -> Result<DashboardSnapshot, CoreError> {
        let primary = self.normalize_primary(primary)?;
        let closed_trades: Section<Vec<ClosedTrade>> = closed_trades
            .and_then(|raw| self.normalize_closed_trades(&raw))
            .into();
        let lessons: Section<Vec<Lesson>> =
            lessons.and_then(|raw| self.normalize_lessons(&raw)).into();
        Ok(DashboardSnapshot::assemble(primary, closed_trades, lessons))
    }

    // ── Primary feed ────────────────────────────────────────────────

    pub fn normalize_primary(&self, raw: &Value) -> Result<PrimaryView, CoreError> {
        let fields = root_resolver("primary feed", raw)?;

        let metadata = self.normalize_metadata(optional_object(&fields, &root::METADATA)?)?;

        let empty = Map::new();
        let portfolio =
            self.normalize_portfolio(optional_object(&fields, &root::PORTFOLIO)?.unwrap_or(&empty));

        let positions = object_list(&fields, &root::ACTIVE_POSITIONS)?
            .into_iter()
            .map(|record| self.normalize_position(record))
            .collect::<Result<Vec<_>, _>>()?;

        let performance_raw = optional_object(&fields, &root::PERFORMANCE)?;
        let performance = self.normalize_performance(performance_raw.unwrap_or(&empty));

        // Newer feeds nest strategies under performance_metrics.by_strategy
        let strategy_map = performance_raw
            .and_then(|p| FieldResolver::new("performance_metrics", p).object(&performance::BY_STRATEGY))
            .or_else(|| fields.object(&root::STRATEGY_LEGACY));
        let strategies = strategy_map
            .map(|m| self.normalize_strategies(m))
            .unwrap_or_default();

        let risk = self.normalize_risk(optional_object(&fields, &root::RISK)?.unwrap_or(&empty));

        Ok(PrimaryView {
            metadata,
            portfolio,
            positions,
            performance,
            strategies,
            risk,
        })
    }

    /// `metadata.last_updated` is required; its absence fails the whole feed.
    pub fn normalize_metadata(
        &self,
        record: Option<&Map<String, Value>>,
    ) -> Result<Metadata, CoreError> {
        let record = record.ok_or_else(|| CoreError::missing("metadata", "last_updated"))?;
        let fields = FieldResolver::new("metadata", record);
        let last_updated = require_string(&fields, &metadata::LAST_UPDATED)?;
        let last_updated_at = parse_timestamp(&last_updated);
        if last_updated_at.is_none() {
            tracing::warn!(last_updated = %last_updated, "Unrecognised timestamp format");
        }
        Ok(Metadata {
            last_updated,
            last_updated_at,
        })
    }

    pub fn normalize_portfolio(&self, record: &Map<String, Value>) -> PortfolioSummary {
        let fields = FieldResolver::new("portfolio", record);

        let total_capital = fields.get_or_zero::<f64>(&portfolio::TOTAL_CAPITAL);
        let deployed_capital = fields.get_or_zero::<f64>(&portfolio::DEPLOYED_CAPITAL);
        let deployed_percent = self.derivations.resolve_or_derive(
            &fields,
            &portfolio::DEPLOYED_PERCENT,
            Derivation::DeployedPercent,
            (deployed_capital, total_capital),
        );

        PortfolioSummary {
            total_capital,
            deployed_capital,
            deployed_percent,
            cash_available: fields.get_or_zero(&portfolio::CASH_AVAILABLE),
            active_positions_count: fields
                .get_first_valid(&portfolio::ACTIVE_POSITIONS_COUNT)
                .unwrap_or_default(),
            max_positions: fields.get_or_zero(&portfolio::MAX_POSITIONS),
            total_pnl: fields.get_or_zero(&portfolio::TOTAL_PNL),
            total_pnl_percent: fields.get_or_zero(&portfolio::TOTAL_PNL_PERCENT),
        }
    }

    /// A position without a symbol is a schema error.
    pub fn normalize_position(&self, record: &Map<String, Value>) -> Result<Position, CoreError> {
        let fields = FieldResolver::new("position", record);

        let symbol = require_string(&fields, &position::SYMBOL)?;
        let current_price = fields.get_or_zero::<f64>(&position::CURRENT_PRICE);
        let quantity = fields.get_or_zero::<u32>(&position::QUANTITY);
        let current_value = self.derivations.resolve_or_derive(
            &fields,
            &position::CURRENT_VALUE,
            Derivation::PositionValue,
            (current_price, f64::from(quantity)),
        );

        Ok(Position {
            symbol,
            display_name: fields.get_or_zero(&position::DISPLAY_NAME),
            entry_price: fields.get_or_zero(&position::ENTRY_PRICE),
            current_price,
            stop_loss: fields.get_or_zero(&position::STOP_LOSS),
            target_1: fields.get_or_zero(&position::TARGET_1),
            target_2: fields.get_or_zero(&position::TARGET_2),
            quantity,
            invested_capital: fields.get_or_zero(&position::INVESTED_CAPITAL),
            current_value,
            unrealized_pnl: fields.get_or_zero(&position::UNREALIZED_PNL),
            unrealized_pnl_percent: fields.get_or_zero(&position::UNREALIZED_PNL_PERCENT),
            distance_to_stop_loss_percent: fields.get_or_zero(&position::DISTANCE_TO_SL),
            distance_to_target_1_percent: fields.get_or_zero(&position::DISTANCE_TO_T1),
            distance_to_target_2_percent: fields.get_or_zero(&position::DISTANCE_TO_T2),
            days_held: fields.get_or_zero(&position::DAYS_HELD),
            gtt_active: fields.get_or_zero(&position::GTT_ACTIVE),
            strategy: fields.get_or_zero(&position::STRATEGY),
            sector: fields.get_or_zero(&position::SECTOR),
            conviction: fields
                .get::<String>(&position::CONVICTION)
                .map(|c| Conviction::parse(&c)),
            score: fields.get(&position::SCORE),
        })
    }

    /// Reads `all_time` when present, otherwise the flat legacy shape.
    pub fn normalize_performance(&self, record: &Map<String, Value>) -> PerformanceSummary {
        let outer = FieldResolver::new("performance_metrics", record);
        let metrics = outer.object(&performance::ALL_TIME).unwrap_or(record);
        let fields = FieldResolver::new("performance", metrics);

        PerformanceSummary {
            total_trades: fields.get_or_zero(&performance::TOTAL_TRADES),
            win_rate: fields.get(&performance::WIN_RATE),
            average_win: fields.get(&performance::AVERAGE_WIN),
            average_loss: fields.get(&performance::AVERAGE_LOSS),
        }
    }

    /// One stat per map entry, sorted by strategy name.
    pub fn normalize_strategies(&self, map: &Map<String, Value>) -> Vec<StrategyStat> {
        let mut stats: Vec<StrategyStat> = map
            .iter()
            .filter_map(|(name, stats)| {
                let Some(record) = stats.as_object() else {
                    tracing::warn!(strategy = %name, "Strategy stats are not an object, skipping");
                    return None;
                };
                let fields = FieldResolver::new("strategy", record);
                Some(StrategyStat {
                    name: name.clone(),
                    total_trades: fields.get_or_zero(&performance::TOTAL_TRADES),
                    win_rate: fields.get(&performance::WIN_RATE),
                    total_pnl: fields.get_or_zero(&performance::TOTAL_PNL),
                })
            })
            .collect();
        stats.sort_by(|a, b| a.name.cmp(&b.name));
        stats
    }

    pub fn normalize_risk(&self, record: &Map<String, Value>) -> RiskSnapshot {
        let fields = FieldResolver::new("risk_metrics", record);

        let daily_loss_used = fields.get_or_zero::<f64>(&risk::DAILY_LOSS_USED);
        let daily_loss_limit = fields.get_or(&risk::DAILY_LOSS_LIMIT, risk::DEFAULT_DAILY_LOSS_LIMIT);
        let current_drawdown_percent = fields.get_or_zero::<f64>(&risk::CURRENT_DRAWDOWN);
        let max_drawdown_limit_percent =
            fields.get_or(&risk::MAX_DRAWDOWN_LIMIT, risk::DEFAULT_MAX_DRAWDOWN_LIMIT);
        let risk_status = fields.get_or(&risk::RISK_STATUS, risk::DEFAULT_RISK_STATUS.to_string());

        RiskSnapshot {
            daily_loss_used,
            daily_loss_limit,
            current_drawdown_percent,
            max_drawdown_limit_percent,
            risk_status: StatusToken::new(risk_status),
            daily_loss_percent: self
                .derivations
                .daily_loss_percent(daily_loss_used, daily_loss_limit),
            drawdown_percent: self
                .derivations
                .drawdown_percent(current_drawdown_percent, max_drawdown_limit_percent),
        }
    }

    // ── Closed-trades feed ──────────────────────────────────────────

    /// Absent `closed_trades` is an empty history, not an error.
    pub fn normalize_closed_trades(&self, raw: &Value) -> Result<Vec<ClosedTrade>, CoreError> {
        let fields = root_resolver("closed trades feed", raw)?;
        object_list(&fields, &root::CLOSED_TRADES)?
            .into_iter()
            .map(|record| self.normalize_closed_trade(record))
            .collect()
    }

    pub fn normalize_closed_trade(
        &self,
        record: &Map<String, Value>,
    ) -> Result<ClosedTrade, CoreError> {
        let fields = FieldResolver::new("closed trade", record);

        let symbol = require_string(&fields, &closed_trade::SYMBOL)?;
        let analysis = fields.object(&closed_trade::ANALYSIS).map(|a| {
            let analysis = FieldResolver::new("trade analysis", a);
            TradeAnalysis {
                what_worked: analysis.get_or_zero(&closed_trade::WHAT_WORKED),
                what_didnt: analysis.get_or_zero(&closed_trade::WHAT_DIDNT),
                key_learnings: analysis.get_or_zero(&closed_trade::KEY_LEARNINGS),
            }
        });

        Ok(ClosedTrade {
            symbol,
            display_name: fields.get_or_zero(&closed_trade::DISPLAY_NAME),
            entry_date: date_field(&fields, &closed_trade::ENTRY_DATE),
            exit_date: date_field(&fields, &closed_trade::EXIT_DATE),
            holding_days: fields.get_or_zero(&closed_trade::HOLDING_DAYS),
            entry_price: fields.get_or_zero(&closed_trade::ENTRY_PRICE),
            exit_price: fields.get_or_zero(&closed_trade::EXIT_PRICE),
            quantity: fields.get_or_zero(&closed_trade::QUANTITY),
            realized_pnl: fields.get_or_zero(&closed_trade::REALIZED_PNL),
            realized_pnl_percent: fields.get_or_zero(&closed_trade::REALIZED_PNL_PERCENT),
            exit_type: fields
                .get::<String>(&closed_trade::EXIT_TYPE)
                .map(StatusToken::new),
            strategy: fields.get_or_zero(&closed_trade::STRATEGY),
            sector: fields.get_or_zero(&closed_trade::SECTOR),
            analysis,
        })
    }

    // ── Lessons feed ────────────────────────────────────────────────

    /// `lessons_learned.mistakes_to_avoid`, empty when absent at any level.
    pub fn normalize_lessons(&self, raw: &Value) -> Result<Vec<Lesson>, CoreError> {
        let fields = root_resolver("lessons feed", raw)?;
        let Some(learned) = fields.object(&root::LESSONS_LEARNED) else {
            return Ok(Vec::new());
        };
        let learned = FieldResolver::new("lessons_learned", learned);
        Ok(object_list(&learned, &root::MISTAKES_TO_AVOID)?
            .into_iter()
            .map(|record| self.normalize_lesson(record))
            .collect())
    }

    pub fn normalize_lesson(&self, record: &Map<String, Value>) -> Lesson {
        let fields = FieldResolver::new("lesson", record);
        Lesson {
            mistake_description: fields.get_or_zero(&lesson::MISTAKE_DESCRIPTION),
            date_learned: fields.get_or_zero(&lesson::DATE_LEARNED),
            mistake_category: fields.get_or_zero(&lesson::MISTAKE_CATEGORY),
            severity: fields.get_or_zero(&lesson::SEVERITY),
            loss_amount: fields.get_or_zero(&lesson::LOSS_AMOUNT),
            checklist_before_entry: strip_glyph(
                fields.get_or_zero(&lesson::CHECKLIST),
                lesson::CHECK_GLYPH,
            ),
            red_flags_to_avoid: strip_glyph(
                fields.get_or_zero(&lesson::RED_FLAGS),
                lesson::CROSS_GLYPH,
            ),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn root_resolver<'a>(entity: &'static str, raw: &'a Value) -> Result<FieldResolver<'a>, CoreError> {
    raw.as_object()
        .map(|record| FieldResolver::new(entity, record))
        .ok_or_else(|| CoreError::shape(entity, "<root>", "expected a JSON object"))
}

/// A present value must be an object; absent yields `None`.
fn optional_object<'a>(
    fields: &FieldResolver<'a>,
    spec: &FieldSpec,
) -> Result<Option<&'a Map<String, Value>>, CoreError> {
    match fields.raw(spec) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(CoreError::shape(fields.entity(), spec.attribute, "expected an object")),
    }
}

/// A present value must be an array of objects; absent yields an empty list.
fn object_list<'a>(
    fields: &FieldResolver<'a>,
    spec: &FieldSpec,
) -> Result<Vec<&'a Map<String, Value>>, CoreError> {
    let Some(value) = fields.raw(spec) else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| CoreError::shape(fields.entity(), spec.attribute, "expected an array"))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_object().ok_or_else(|| {
                CoreError::shape(
                    fields.entity(),
                    spec.attribute,
                    format!("item {idx} is not an object"),
                )
            })
        })
        .collect()
}

fn require_string(fields: &FieldResolver<'_>, spec: &FieldSpec) -> Result<String, CoreError> {
    let value = fields
        .raw(spec)
        .ok_or_else(|| CoreError::missing(fields.entity(), spec.attribute))?;
    String::from_value(value)
        .ok_or_else(|| CoreError::shape(fields.entity(), spec.attribute, "expected a string"))
}

/// Leading `YYYY-MM-DD` of a date or datetime string.
fn date_field(fields: &FieldResolver<'_>, spec: &FieldSpec) -> Option<NaiveDate> {
    let raw = fields.get::<String>(spec)?;
    let parsed = raw
        .trim()
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    if parsed.is_none() {
        tracing::warn!(entity = fields.entity(), attribute = spec.attribute, raw = %raw, "Unparseable date");
    }
    parsed
}

/// RFC 3339, or an offset-less ISO timestamp taken to be in the producer's zone.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }
    let offset = FixedOffset::east_opt(metadata::DEFAULT_OFFSET_SECS)?;
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

fn strip_glyph(items: Vec<String>, glyph: &str) -> Vec<String> {
    items
        .into_iter()
        .map(|item| match item.trim_start().strip_prefix(glyph) {
            Some(rest) => rest.trim_start().to_string(),
            None => item,
        })
        .collect()
}

