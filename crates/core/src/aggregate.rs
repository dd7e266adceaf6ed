use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::domain::catalog::{Lookup, PriceTable};
use crate::domain::sale::{ProductRef, SaleRecord};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub total: Decimal,
    pub matched_records: usize,
    pub unmatched: BTreeSet<ProductRef>,
    /// Sold titles whose catalog entry has no usable price.
    pub unpriced: BTreeSet<String>,
    /// Sold titles with at least one non-numeric quantity.
    pub invalid_quantities: BTreeSet<String>,
}

impl Aggregation {
    pub fn unmatched_names(&self) -> Vec<String> {
        self.unmatched.iter().map(ToString::to_string).collect()
    }
}

/// Folds sale records against the price table.
///
/// A record whose product is a listed title is matched and adds
/// `price * quantity` to the total; every other record lands in the unmatched
/// set whatever its quantity. A matched record without a usable price or
/// with a non-numeric quantity adds nothing and is remembered. Never fails.
pub fn aggregate(prices: &PriceTable, sales: &[SaleRecord]) -> Aggregation {
    let aggregation = sales.iter().fold(Aggregation::default(), |mut acc, sale| {
        let Some(title) = sale.product.title() else {
            acc.unmatched.insert(sale.product.clone());
            return acc;
        };

        match prices.lookup(title) {
            Lookup::NotListed => {
                acc.unmatched.insert(sale.product.clone());
            }
            Lookup::Unpriced => {
                acc.matched_records += 1;
                acc.unpriced.insert(title.to_string());
            }
            Lookup::Priced(_) if sale.quantity.is_invalid() => {
                acc.matched_records += 1;
                acc.invalid_quantities.insert(title.to_string());
            }
            Lookup::Priced(price) => {
                // Saturates at the Decimal bounds instead of panicking.
                let line_total = price.saturating_mul(sale.quantity());
                acc.total = acc.total.saturating_add(line_total);
                acc.matched_records += 1;
            }
        }
        acc
    });

    for title in &aggregation.unpriced {
        tracing::warn!(
            event_name = "sales.aggregate.unpriced_product",
            title = %title,
            "catalog entry has no usable price; its sales add nothing"
        );
    }
    for title in &aggregation.invalid_quantities {
        tracing::warn!(
            event_name = "sales.aggregate.invalid_quantity",
            title = %title,
            "non-numeric quantity ignored"
        );
    }
    tracing::info!(
        event_name = "sales.aggregate.completed",
        records = sales.len(),
        matched_records = aggregation.matched_records,
        unmatched_products = aggregation.unmatched.len(),
        total = %aggregation.total,
        "sales aggregated"
    );

    aggregation
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::aggregate;
    use crate::domain::catalog::{CatalogEntry, Lookup, PriceTable};
    use crate::domain::number::NumericField;
    use crate::domain::sale::{ProductRef, SaleRecord};

    fn table(entries: &[(&str, Decimal)]) -> PriceTable {
        entries
            .iter()
            .map(|(title, price)| CatalogEntry {
                title: ProductRef::Title(title.to_string()),
                price: NumericField::Number(*price),
            })
            .collect()
    }

    fn sale(title: &str, quantity: Decimal) -> SaleRecord {
        SaleRecord {
            product: ProductRef::Title(title.to_string()),
            quantity: NumericField::Number(quantity),
        }
    }

    #[test]
    fn matched_sale_contributes_price_times_quantity() {
        let prices = table(&[("Pen", Decimal::new(15, 1))]);
        let result = aggregate(&prices, &[sale("Pen", Decimal::from(4))]);

        assert_eq!(result.total, Decimal::from(6));
        assert_eq!(result.matched_records, 1);
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn unknown_product_is_recorded_and_excluded() {
        let prices = table(&[("Pen", Decimal::new(15, 1))]);
        let result = aggregate(&prices, &[sale("Eraser", Decimal::from(2))]);

        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.matched_records, 0);
        assert_eq!(result.unmatched_names(), vec!["Eraser"]);
    }

    #[test]
    fn missing_quantity_contributes_nothing() {
        let prices = table(&[("Pen", Decimal::new(15, 1))]);
        let sale = SaleRecord {
            product: ProductRef::Title("Pen".to_string()),
            quantity: NumericField::Absent,
        };

        let result = aggregate(&prices, &[sale]);

        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.matched_records, 1);
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn unmatched_record_with_string_quantity_is_still_unmatched() {
        let prices = table(&[("Pen", Decimal::new(15, 1))]);
        let sales = vec![
            sale("Pen", Decimal::from(4)),
            SaleRecord {
                product: ProductRef::Title("Eraser".to_string()),
                quantity: NumericField::Invalid("\"2\"".to_string()),
            },
        ];

        let result = aggregate(&prices, &sales);

        assert_eq!(result.total, Decimal::from(6));
        assert_eq!(result.unmatched_names(), vec!["Eraser"]);
        assert!(result.invalid_quantities.is_empty());
    }

    #[test]
    fn matched_record_with_string_quantity_adds_nothing() {
        let prices = table(&[("Pen", Decimal::new(15, 1))]);
        let sales = vec![
            sale("Pen", Decimal::from(2)),
            SaleRecord {
                product: ProductRef::Title("Pen".to_string()),
                quantity: NumericField::Invalid("\"4\"".to_string()),
            },
        ];

        let result = aggregate(&prices, &sales);

        assert_eq!(result.total, Decimal::from(3));
        assert_eq!(result.matched_records, 2);
        assert!(result.unmatched.is_empty());
        assert_eq!(result.invalid_quantities.iter().collect::<Vec<_>>(), vec!["Pen"]);
    }

    #[test]
    fn sold_product_without_usable_price_adds_nothing() {
        let prices: PriceTable = vec![
            CatalogEntry {
                title: ProductRef::Title("Pen".to_string()),
                price: NumericField::Number(Decimal::new(15, 1)),
            },
            CatalogEntry { title: ProductRef::Title("Gift".to_string()), price: NumericField::Null },
        ]
        .into_iter()
        .collect();

        let result =
            aggregate(&prices, &[sale("Pen", Decimal::from(4)), sale("Gift", Decimal::from(2))]);

        assert_eq!(result.total, Decimal::from(6));
        assert_eq!(result.matched_records, 2);
        assert!(result.unmatched.is_empty());
        assert_eq!(result.unpriced.iter().collect::<Vec<_>>(), vec!["Gift"]);
    }

    #[test]
    fn unmatched_products_are_deduplicated_and_sorted() {
        let prices = table(&[("Pen", Decimal::ONE)]);
        let sales = vec![
            sale("Stapler", Decimal::ONE),
            sale("Eraser", Decimal::ONE),
            sale("Stapler", Decimal::from(3)),
            SaleRecord { product: ProductRef::Absent, quantity: NumericField::Number(Decimal::ONE) },
            SaleRecord { product: ProductRef::Null, quantity: NumericField::Null },
        ];

        let result = aggregate(&prices, &sales);

        assert_eq!(result.unmatched_names(), vec!["Eraser", "Stapler", "null", "<sin producto>"]);
    }

    #[test]
    fn every_record_is_either_matched_or_unmatched() {
        let prices = table(&[("Pen", Decimal::new(15, 1)), ("Desk", Decimal::new(12050, 2))]);
        let sales = vec![
            sale("Pen", Decimal::from(2)),
            sale("Lamp", Decimal::from(1)),
            sale("Desk", Decimal::from(1)),
            sale("Chair", Decimal::from(5)),
        ];

        let result = aggregate(&prices, &sales);

        let expected: Decimal = sales
            .iter()
            .filter_map(|sale| match sale.product.title().map(|t| prices.lookup(t)) {
                Some(Lookup::Priced(price)) => Some(price * sale.quantity()),
                _ => None,
            })
            .sum();
        assert_eq!(result.total, expected);
        assert_eq!(result.total, Decimal::new(12350, 2));
        assert_eq!(result.matched_records + 2, sales.len());
        assert_eq!(result.unmatched.len(), 2);
    }

    #[test]
    fn fractional_prices_sum_exactly() {
        let prices = table(&[("Clip", Decimal::new(1, 1)), ("Tape", Decimal::new(2, 1))]);
        let sales = vec![sale("Clip", Decimal::ONE), sale("Tape", Decimal::ONE)];

        let result = aggregate(&prices, &sales);

        assert_eq!(result.total, Decimal::new(3, 1));
    }

    #[test]
    fn empty_sales_produce_zero_total() {
        let prices = table(&[("Pen", Decimal::ONE)]);
        let result = aggregate(&prices, &[]);

        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.matched_records, 0);
        assert!(result.unmatched.is_empty());
    }
}
