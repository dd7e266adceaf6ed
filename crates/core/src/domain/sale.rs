use std::fmt;

use rust_decimal::Decimal;
use serde::de::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::number::NumericField;

/// What a sale record says about its product.
///
/// Only `Title` can ever match a catalog entry. `Null` and `Absent` are kept
/// apart so reports can tell an explicit `null` from a missing field.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductRef {
    Title(String),
    /// Any non-string JSON value, kept as its compact JSON text.
    Other(String),
    Null,
    #[default]
    Absent,
}

impl ProductRef {
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Title(title) => Some(title),
            _ => None,
        }
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(title) => f.write_str(title),
            Self::Other(raw) => f.write_str(raw),
            Self::Null => f.write_str("null"),
            Self::Absent => f.write_str("<sin producto>"),
        }
    }
}

impl<'de> Deserialize<'de> for ProductRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(title) => Self::Title(title),
            Value::Null => Self::Null,
            other => Self::Other(other.to_string()),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Product", default)]
    pub product: ProductRef,
    #[serde(rename = "Quantity", default)]
    pub quantity: NumericField,
}

impl SaleRecord {
    /// Only a numeric quantity counts; absent, `null` and non-numeric
    /// quantities are zero.
    pub fn quantity(&self) -> Decimal {
        self.quantity.as_decimal().unwrap_or(Decimal::ZERO)
    }
}

/// Interprets a loaded sales document as a sequence of records.
///
/// Only the outer array is required. Records are decoded leniently: an
/// element that is not an object becomes a record with no product.
pub fn parse_sales(document: Value) -> Result<Vec<SaleRecord>, serde_json::Error> {
    let elements: Vec<Value> = serde_json::from_value(document)?;
    Ok(elements
        .into_iter()
        .map(|element| match element {
            Value::Object(_) => serde_json::from_value(element).unwrap_or_default(),
            _ => SaleRecord::default(),
        })
        .collect())
}
