use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::number::NumericField;
use crate::domain::sale::ProductRef;

/// One catalog element. Both fields decode leniently; whether an entry is
/// usable is decided when the price table is built and queried.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub title: ProductRef,
    #[serde(default)]
    pub price: NumericField,
}

/// Interprets a loaded catalog document as a sequence of entries.
///
/// The document must be an array. An element that is not an object becomes
/// an entry without a title.
pub fn parse_catalog(document: Value) -> Result<Vec<CatalogEntry>, serde_json::Error> {
    let elements: Vec<Value> = serde_json::from_value(document)?;
    Ok(elements
        .into_iter()
        .map(|element| match element {
            Value::Object(_) => serde_json::from_value(element).unwrap_or_default(),
            _ => CatalogEntry::default(),
        })
        .collect())
}

/// Result of looking a sold title up in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Priced(Decimal),
    /// Listed, but its price is missing, `null` or not a number.
    Unpriced,
    NotListed,
}

/// Title to price lookup built once per run.
///
/// A title that appears more than once keeps the price of its last entry;
/// the repeated titles are remembered so the run can surface them. Entries
/// without a string title can never match and are only counted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceTable {
    prices: HashMap<String, Option<Decimal>>,
    duplicate_titles: BTreeSet<String>,
    untitled_entries: usize,
}

impl PriceTable {
    pub fn lookup(&self, title: &str) -> Lookup {
        match self.prices.get(title) {
            Some(Some(price)) => Lookup::Priced(*price),
            Some(None) => Lookup::Unpriced,
            None => Lookup::NotListed,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn duplicate_titles(&self) -> &BTreeSet<String> {
        &self.duplicate_titles
    }

    pub fn untitled_entries(&self) -> usize {
        self.untitled_entries
    }
}

impl FromIterator<CatalogEntry> for PriceTable {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(entries: I) -> Self {
        let mut table = Self::default();
        for entry in entries {
            let ProductRef::Title(title) = entry.title else {
                table.untitled_entries += 1;
                continue;
            };
            if table.prices.insert(title.clone(), entry.price.as_decimal()).is_some() {
                table.duplicate_titles.insert(title);
            }
        }
        table
    }
}
