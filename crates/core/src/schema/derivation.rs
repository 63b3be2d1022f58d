use super::resolver::{FieldResolver, FieldSpec};

/// Attributes that can be computed from siblings when the feed omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// deployed capital / total capital × 100
    DeployedPercent,
    /// daily loss used / daily loss limit × 100
    DailyLossPercent,
    /// current drawdown / drawdown limit × 100
    DrawdownPercent,
    /// current price × quantity
    PositionValue,
}

impl Derivation {
    /// Evaluate the formula on already-resolved inputs.
    ///
    /// Ratios with a zero (or non-finite) divisor yield `0.0`.
    pub fn evaluate(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Derivation::DeployedPercent
            | Derivation::DailyLossPercent
            | Derivation::DrawdownPercent => percent_of(lhs, rhs),
            Derivation::PositionValue => {
                let product = lhs * rhs;
                if product.is_finite() {
                    product
                } else {
                    0.0
                }
            }
        }
    }
}

/// `part / whole × 100`, or `0.0` when the result would not be finite.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 || !whole.is_finite() || !part.is_finite() {
        return 0.0;
    }
    let pct = part / whole * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Fills derivable attributes that are absent from the raw record.
///
/// Stateless: every normalization pass re-evaluates from current inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DerivationEngine;

impl DerivationEngine {
    pub fn new() -> Self {
        Self
    }

    /// The resolved value when present, otherwise the derivation applied to `inputs`.
    pub fn resolve_or_derive(
        &self,
        fields: &FieldResolver<'_>,
        spec: &FieldSpec,
        derivation: Derivation,
        inputs: (f64, f64),
    ) -> f64 {
        match fields.get::<f64>(spec) {
            Some(value) => value,
            None => {
                let derived = derivation.evaluate(inputs.0, inputs.1);
                tracing::debug!(
                    entity = fields.entity(),
                    attribute = spec.attribute,
                    derived,
                    "Derived missing attribute"
                );
                derived
            }
        }
    }

    pub fn deployed_percent(&self, deployed_capital: f64, total_capital: f64) -> f64 {
        Derivation::DeployedPercent.evaluate(deployed_capital, total_capital)
    }

    pub fn daily_loss_percent(&self, used: f64, limit: f64) -> f64 {
        Derivation::DailyLossPercent.evaluate(used, limit)
    }

    pub fn drawdown_percent(&self, current: f64, limit: f64) -> f64 {
        Derivation::DrawdownPercent.evaluate(current, limit)
    }

    pub fn position_value(&self, current_price: f64, quantity: u32) -> f64 {
        Derivation::PositionValue.evaluate(current_price, f64::from(quantity))
    }
}
