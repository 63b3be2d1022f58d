use serde::{Deserialize, Serialize};

/// An upstream enum-like token such as `STOP_LOSS_HIT` or `ALL_CLEAR`.
///
/// The raw token is kept verbatim; the display forms are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusToken(String);

impl StatusToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Every underscore replaced by a space: `TARGET_1_HIT` → `TARGET 1 HIT`.
    pub fn label(&self) -> String {
        self.0.replace('_', " ")
    }

    /// Title-cased label: `ALL_CLEAR` → `All Clear`.
    pub fn title(&self) -> String {
        self.0
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let lower = w.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Lowercase token, as used for style classes: `ALL_CLEAR` → `all_clear`.
    pub fn slug(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for StatusToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Qualitative confidence tier on a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conviction {
    Low,
    Medium,
    High,
    /// Unrecognised tier, kept as sent.
    Other(String),
}

impl Conviction {
    /// Case-insensitive parse; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "LOW" => Conviction::Low,
            "MEDIUM" => Conviction::Medium,
            "HIGH" => Conviction::High,
            _ => Conviction::Other(raw.trim().to_string()),
        }
    }
}

impl std::fmt::Display for Conviction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conviction::Low => write!(f, "Low"),
            Conviction::Medium => write!(f, "Medium"),
            Conviction::High => write!(f, "High"),
            Conviction::Other(s) => write!(f, "{s}"),
        }
    }
}
