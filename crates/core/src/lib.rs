pub mod aggregate;
pub mod config;
pub mod domain;
pub mod errors;
pub mod loader;
pub mod pipeline;
pub mod report;

pub use aggregate::{aggregate, Aggregation};
pub use domain::catalog::{parse_catalog, CatalogEntry, Lookup, PriceTable};
pub use domain::number::NumericField;
pub use domain::sale::{parse_sales, ProductRef, SaleRecord};
pub use errors::{DocumentError, LoadError, PipelineError, ReportError};
pub use loader::load_document;
pub use pipeline::{compute, PipelineOutcome};
pub use report::{format_amount, render_unmatched, SalesReport, DEFAULT_OUTPUT_FILE};
