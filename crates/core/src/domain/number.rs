use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Converts a JSON number into a `Decimal` through its textual form so that
/// `1.5` stays exactly `1.5`. Exponent notation is accepted.
pub(crate) fn decimal_from_number(number: &Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text).ok().or_else(|| Decimal::from_scientific(&text).ok())
}

/// A numeric field as written in an input record.
///
/// Decoding never fails: anything that is not a representable number is kept
/// as its JSON text so the caller decides whether it matters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NumericField {
    Number(Decimal),
    Null,
    #[default]
    Absent,
    Invalid(String),
}

impl NumericField {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl From<Value> for NumericField {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => decimal_from_number(&number)
                .map(Self::Number)
                .unwrap_or_else(|| Self::Invalid(number.to_string())),
            Value::Null => Self::Null,
            other => Self::Invalid(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for NumericField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}
