use serde_json::{Map, Value};

/// A logical attribute and the raw field names that may carry it,
/// newest schema first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name used in logs and schema errors
    pub attribute: &'static str,

    /// Candidate raw keys in precedence order
    pub candidates: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(attribute: &'static str, candidates: &'static [&'static str]) -> Self {
        Self {
            attribute,
            candidates,
        }
    }
}

/// Returns the value of the first candidate that is present and not `null`.
///
/// Presence is explicit: `0`, `false` and `""` are values, not gaps.
pub fn resolve<'a>(record: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .find_map(|name| record.get(*name).filter(|v| !v.is_null()))
}

/// Conversion from a resolved JSON value into a view-model type.
pub trait FieldValue: Sized {
    /// `None` when the value has the wrong shape.
    fn from_value(value: &Value) -> Option<Self>;

    /// Type-appropriate zero used when no default is declared.
    fn zero() -> Self;
}

impl FieldValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            // Some producers write prices as strings
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    fn zero() -> Self {
        0.0
    }
}

impl FieldValue for u32 {
    fn from_value(value: &Value) -> Option<Self> {
        if let Some(n) = value.as_u64() {
            return u32::try_from(n).ok();
        }
        let f = f64::from_value(value)?;
        if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
            Some(f as u32)
        } else {
            None
        }
    }

    fn zero() -> Self {
        0
    }
}

impl FieldValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn zero() -> Self {
        false
    }
}

impl FieldValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn zero() -> Self {
        String::new()
    }
}

impl FieldValue for Vec<String> {
    fn from_value(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        )
    }

    fn zero() -> Self {
        Vec::new()
    }
}

/// Typed, presence-checked reads over one raw record.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    entity: &'static str,
    record: &'a Map<String, Value>,
}

impl<'a> FieldResolver<'a> {
    pub fn new(entity: &'static str, record: &'a Map<String, Value>) -> Self {
        Self { entity, record }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Raw value of the first present candidate.
    pub fn raw(&self, spec: &FieldSpec) -> Option<&'a Value> {
        resolve(self.record, spec.candidates)
    }

    pub fn is_present(&self, spec: &FieldSpec) -> bool {
        self.raw(spec).is_some()
    }

    /// Typed value of the first present candidate.
    ///
    /// A present value of the wrong shape is logged and treated as absent;
    /// later candidates are not consulted.
    pub fn get<T: FieldValue>(&self, spec: &FieldSpec) -> Option<T> {
        let value = self.raw(spec)?;
        let converted = T::from_value(value);
        if converted.is_none() {
            tracing::warn!(
                entity = self.entity,
                attribute = spec.attribute,
                value = %value,
                "Field has an unexpected type, falling back to default"
            );
        }
        converted
    }

    /// Like [`FieldResolver::get`], but a wrong-shaped candidate is skipped
    /// and the next one consulted.
    ///
    /// For aliases whose older name was reused for a different shape.
    pub fn get_first_valid<T: FieldValue>(&self, spec: &FieldSpec) -> Option<T> {
        spec.candidates.iter().find_map(|name| {
            let value = self.record.get(*name).filter(|v| !v.is_null())?;
            let converted = T::from_value(value);
            if converted.is_none() {
                tracing::debug!(
                    entity = self.entity,
                    attribute = spec.attribute,
                    candidate = *name,
                    "Skipping candidate with unexpected type"
                );
            }
            converted
        })
    }

    pub fn get_or<T: FieldValue>(&self, spec: &FieldSpec, default: T) -> T {
        self.get(spec).unwrap_or(default)
    }

    pub fn get_or_zero<T: FieldValue>(&self, spec: &FieldSpec) -> T {
        self.get(spec).unwrap_or_else(T::zero)
    }

    /// Nested object under the first present candidate, if it is an object.
    pub fn object(&self, spec: &FieldSpec) -> Option<&'a Map<String, Value>> {
        self.raw(spec).and_then(Value::as_object)
    }
}
