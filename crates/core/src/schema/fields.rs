//! Field tables for every entity in the feeds.
//!
//! Candidates are listed newest schema first. Supporting a new alias means
//! adding a name here; the normalizer does not change.

use super::resolver::FieldSpec;

pub mod root {
    use super::FieldSpec;

    pub const PORTFOLIO: FieldSpec = FieldSpec::new("portfolio", &["portfolio"]);
    pub const ACTIVE_POSITIONS: FieldSpec =
        FieldSpec::new("active_positions", &["active_positions"]);
    pub const PERFORMANCE: FieldSpec =
        FieldSpec::new("performance_metrics", &["performance_metrics"]);
    pub const STRATEGY_LEGACY: FieldSpec =
        FieldSpec::new("strategy_performance", &["strategy_performance"]);
    pub const RISK: FieldSpec = FieldSpec::new("risk_metrics", &["risk_metrics"]);
    pub const METADATA: FieldSpec = FieldSpec::new("metadata", &["metadata"]);
    pub const CLOSED_TRADES: FieldSpec = FieldSpec::new("closed_trades", &["closed_trades"]);
    pub const LESSONS_LEARNED: FieldSpec =
        FieldSpec::new("lessons_learned", &["lessons_learned"]);
    pub const MISTAKES_TO_AVOID: FieldSpec =
        FieldSpec::new("mistakes_to_avoid", &["mistakes_to_avoid"]);
}

pub mod portfolio {
    use super::FieldSpec;

    pub const TOTAL_CAPITAL: FieldSpec =
        FieldSpec::new("total_capital", &["pilot_capital", "total_capital"]);
    pub const DEPLOYED_CAPITAL: FieldSpec =
        FieldSpec::new("deployed_capital", &["deployed_capital"]);
    pub const DEPLOYED_PERCENT: FieldSpec =
        FieldSpec::new("deployed_percent", &["deployed_percentage"]);
    pub const CASH_AVAILABLE: FieldSpec =
        FieldSpec::new("cash_available", &["cash_available", "available_cash"]);
    /// `active_positions` also names the top-level position list; read with
    /// `get_first_valid` so an array there falls through to the count.
    pub const ACTIVE_POSITIONS_COUNT: FieldSpec = FieldSpec::new(
        "active_positions_count",
        &["active_positions", "active_positions_count"],
    );
    pub const MAX_POSITIONS: FieldSpec = FieldSpec::new("max_positions", &["max_positions"]);
    pub const TOTAL_PNL: FieldSpec =
        FieldSpec::new("total_pnl", &["total_pnl", "total_unrealized_pnl"]);
    pub const TOTAL_PNL_PERCENT: FieldSpec = FieldSpec::new(
        "total_pnl_percent",
        &["total_pnl_percent", "total_unrealized_pnl_percent"],
    );
}

pub mod position {
    use super::FieldSpec;

    pub const SYMBOL: FieldSpec = FieldSpec::new("symbol", &["stock"]);
    pub const DISPLAY_NAME: FieldSpec =
        FieldSpec::new("display_name", &["stock_name", "full_name"]);
    pub const ENTRY_PRICE: FieldSpec = FieldSpec::new("entry_price", &["entry_price"]);
    pub const CURRENT_PRICE: FieldSpec = FieldSpec::new("current_price", &["current_price"]);
    pub const STOP_LOSS: FieldSpec = FieldSpec::new("stop_loss", &["stop_loss"]);
    pub const TARGET_1: FieldSpec = FieldSpec::new("target_1", &["target_1"]);
    pub const TARGET_2: FieldSpec = FieldSpec::new("target_2", &["target_2"]);
    pub const QUANTITY: FieldSpec = FieldSpec::new("quantity", &["quantity", "shares"]);
    pub const INVESTED_CAPITAL: FieldSpec =
        FieldSpec::new("invested_capital", &["invested_capital", "capital_invested"]);
    pub const CURRENT_VALUE: FieldSpec = FieldSpec::new("current_value", &["current_value"]);
    pub const UNREALIZED_PNL: FieldSpec = FieldSpec::new("unrealized_pnl", &["unrealized_pnl"]);
    pub const UNREALIZED_PNL_PERCENT: FieldSpec =
        FieldSpec::new("unrealized_pnl_percent", &["pnl_percent"]);
    pub const DISTANCE_TO_SL: FieldSpec =
        FieldSpec::new("distance_to_stop_loss_percent", &["distance_to_sl_percent"]);
    pub const DISTANCE_TO_T1: FieldSpec =
        FieldSpec::new("distance_to_target_1_percent", &["distance_to_t1_percent"]);
    pub const DISTANCE_TO_T2: FieldSpec =
        FieldSpec::new("distance_to_target_2_percent", &["distance_to_t2_percent"]);
    pub const DAYS_HELD: FieldSpec = FieldSpec::new("days_held", &["days_held"]);
    pub const GTT_ACTIVE: FieldSpec = FieldSpec::new("gtt_active", &["gtt_active"]);
    pub const STRATEGY: FieldSpec = FieldSpec::new("strategy", &["strategy"]);
    pub const SECTOR: FieldSpec = FieldSpec::new("sector", &["sector"]);
    pub const CONVICTION: FieldSpec = FieldSpec::new("conviction", &["conviction"]);
    pub const SCORE: FieldSpec = FieldSpec::new("score", &["score"]);
}

pub mod closed_trade {
    use super::FieldSpec;

    pub const SYMBOL: FieldSpec = FieldSpec::new("symbol", &["stock"]);
    pub const DISPLAY_NAME: FieldSpec = FieldSpec::new("display_name", &["stock_name"]);
    pub const ENTRY_DATE: FieldSpec = FieldSpec::new("entry_date", &["entry_date"]);
    pub const EXIT_DATE: FieldSpec = FieldSpec::new("exit_date", &["exit_date"]);
    pub const HOLDING_DAYS: FieldSpec = FieldSpec::new("holding_days", &["holding_days"]);
    pub const ENTRY_PRICE: FieldSpec = FieldSpec::new("entry_price", &["entry_price"]);
    pub const EXIT_PRICE: FieldSpec = FieldSpec::new("exit_price", &["exit_price"]);
    pub const QUANTITY: FieldSpec = FieldSpec::new("quantity", &["quantity"]);
    pub const REALIZED_PNL: FieldSpec = FieldSpec::new("realized_pnl", &["realized_pnl"]);
    pub const REALIZED_PNL_PERCENT: FieldSpec =
        FieldSpec::new("realized_pnl_percent", &["realized_pnl_percent"]);
    pub const EXIT_TYPE: FieldSpec = FieldSpec::new("exit_type", &["exit_type"]);
    pub const STRATEGY: FieldSpec = FieldSpec::new("strategy", &["strategy"]);
    pub const SECTOR: FieldSpec = FieldSpec::new("sector", &["sector"]);
    pub const ANALYSIS: FieldSpec = FieldSpec::new("analysis", &["analysis"]);
    pub const WHAT_WORKED: FieldSpec = FieldSpec::new("what_worked", &["what_worked"]);
    pub const WHAT_DIDNT: FieldSpec = FieldSpec::new("what_didnt", &["what_didnt"]);
    pub const KEY_LEARNINGS: FieldSpec = FieldSpec::new("key_learnings", &["key_learnings"]);
}

pub mod performance {
    use super::FieldSpec;

    pub const ALL_TIME: FieldSpec = FieldSpec::new("all_time", &["all_time"]);
    pub const BY_STRATEGY: FieldSpec = FieldSpec::new("by_strategy", &["by_strategy"]);
    pub const TOTAL_TRADES: FieldSpec = FieldSpec::new("total_trades", &["total_trades"]);
    pub const WIN_RATE: FieldSpec = FieldSpec::new("win_rate", &["win_rate"]);
    pub const AVERAGE_WIN: FieldSpec = FieldSpec::new("average_win", &["average_win"]);
    pub const AVERAGE_LOSS: FieldSpec = FieldSpec::new("average_loss", &["average_loss"]);
    pub const TOTAL_PNL: FieldSpec = FieldSpec::new("total_pnl", &["total_pnl"]);
}

pub mod risk {
    use super::FieldSpec;

    pub const DAILY_LOSS_USED: FieldSpec = FieldSpec::new("daily_loss_used", &["daily_loss_used"]);
    pub const DAILY_LOSS_LIMIT: FieldSpec =
        FieldSpec::new("daily_loss_limit", &["daily_loss_limit"]);
    pub const CURRENT_DRAWDOWN: FieldSpec =
        FieldSpec::new("current_drawdown_percent", &["current_drawdown_percent"]);
    pub const MAX_DRAWDOWN_LIMIT: FieldSpec =
        FieldSpec::new("max_drawdown_limit_percent", &["max_drawdown_limit_percent"]);
    pub const RISK_STATUS: FieldSpec = FieldSpec::new("risk_status", &["risk_status"]);

    pub const DEFAULT_DAILY_LOSS_LIMIT: f64 = 10_000.0;
    pub const DEFAULT_MAX_DRAWDOWN_LIMIT: f64 = 15.0;
    pub const DEFAULT_RISK_STATUS: &str = "ALL_CLEAR";
}

pub mod lesson {
    use super::FieldSpec;

    pub const MISTAKE_DESCRIPTION: FieldSpec =
        FieldSpec::new("mistake_description", &["mistake_description"]);
    pub const DATE_LEARNED: FieldSpec = FieldSpec::new("date_learned", &["date_learned"]);
    pub const MISTAKE_CATEGORY: FieldSpec =
        FieldSpec::new("mistake_category", &["mistake_category"]);
    pub const SEVERITY: FieldSpec = FieldSpec::new("severity", &["severity"]);
    pub const LOSS_AMOUNT: FieldSpec = FieldSpec::new("loss_amount", &["loss_amount"]);
    pub const CHECKLIST: FieldSpec =
        FieldSpec::new("checklist_before_entry", &["checklist_before_entry"]);
    pub const RED_FLAGS: FieldSpec = FieldSpec::new("red_flags_to_avoid", &["red_flags_to_avoid"]);

    /// Glyph prefixed to checklist items by the producer
    pub const CHECK_GLYPH: &str = "✓";
    /// Glyph prefixed to red flags by the producer
    pub const CROSS_GLYPH: &str = "❌";
}

pub mod metadata {
    use super::FieldSpec;

    pub const LAST_UPDATED: FieldSpec = FieldSpec::new("last_updated", &["last_updated"]);

    /// Offset assumed for timestamps written without one (IST).
    pub const DEFAULT_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;
}
