use std::collections::BTreeSet;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::aggregate::{aggregate, Aggregation};
use crate::domain::catalog::{parse_catalog, PriceTable};
use crate::domain::sale::parse_sales;
use crate::errors::{DocumentError, PipelineError};
use crate::loader::load_document;
use crate::report::SalesReport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub aggregation: Aggregation,
    pub duplicate_titles: BTreeSet<String>,
    pub catalog_size: usize,
    pub elapsed: Duration,
}

impl PipelineOutcome {
    pub fn report(&self) -> SalesReport {
        SalesReport::new(self.aggregation.total, self.elapsed)
    }
}

/// Loads both documents, indexes the catalog and folds the sales.
///
/// `elapsed` spans loading through aggregation. The first failing input
/// aborts the run; sales are not read when the catalog fails. Beyond the
/// outer arrays, odd records never abort: they end up unmatched or add
/// nothing.
pub fn compute(catalog_path: &Path, sales_path: &Path) -> Result<PipelineOutcome, PipelineError> {
    let started = Instant::now();

    tracing::info!(
        event_name = "sales.load.started",
        catalog = %catalog_path.display(),
        sales = %sales_path.display(),
        "loading sales inputs"
    );

    let catalog_document = load_document(catalog_path)?;
    let sales_document = load_document(sales_path)?;

    let entries = parse_catalog(catalog_document)
        .map_err(|source| DocumentError { path: catalog_path.to_path_buf(), source })?;
    let prices: PriceTable = entries.into_iter().collect();

    for title in prices.duplicate_titles() {
        tracing::warn!(
            event_name = "sales.catalog.duplicate_title",
            title = %title,
            "catalog title repeated; last price wins"
        );
    }
    if prices.untitled_entries() > 0 {
        tracing::warn!(
            event_name = "sales.catalog.untitled_entries",
            entries = prices.untitled_entries(),
            "catalog entries without a string title can never match"
        );
    }
    tracing::info!(
        event_name = "sales.catalog.indexed",
        products = prices.len(),
        duplicates = prices.duplicate_titles().len(),
        "price table built"
    );

    let sales = parse_sales(sales_document)
        .map_err(|source| DocumentError { path: sales_path.to_path_buf(), source })?;

    let aggregation = aggregate(&prices, &sales);
    let elapsed = started.elapsed();

    Ok(PipelineOutcome {
        aggregation,
        duplicate_titles: prices.duplicate_titles().clone(),
        catalog_size: prices.len(),
        elapsed,
    })
}
