use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::sale::ProductRef;
use crate::errors::ReportError;

pub const DEFAULT_OUTPUT_FILE: &str = "sales_results.txt";
pub const UNMATCHED_HEADER: &str = "Productos no encontrados en el catálogo:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalesReport {
    pub total: Decimal,
    pub elapsed: Duration,
}

impl SalesReport {
    pub fn new(total: Decimal, elapsed: Duration) -> Self {
        Self { total, elapsed }
    }

    pub fn total_line(&self) -> String {
        format!("Total ventas: ${}", format_amount(self.total))
    }

    pub fn elapsed_line(&self) -> String {
        format!("Tiempo ejecución: {:.2}s", self.elapsed.as_secs_f64())
    }

    /// The two report lines, without a trailing newline.
    pub fn render(&self) -> String {
        format!("{}\n{}", self.total_line(), self.elapsed_line())
    }

    /// Overwrites `path` with exactly [`SalesReport::render`].
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.render())
            .map_err(|source| ReportError { path: path.to_path_buf(), source })?;

        tracing::info!(
            event_name = "sales.report.written",
            path = %path.display(),
            total = %format_amount(self.total),
            "sales report written"
        );
        Ok(())
    }
}

/// Two decimal places, midpoints rounded to the even neighbour.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    format!("{rounded:.2}")
}

/// Header plus comma-joined names, or `None` when every product matched.
pub fn render_unmatched(unmatched: &BTreeSet<ProductRef>) -> Option<String> {
    if unmatched.is_empty() {
        return None;
    }

    let names = unmatched.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    Some(format!("{UNMATCHED_HEADER}\n{names}"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::time::Duration;

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::{format_amount, render_unmatched, SalesReport};
    use crate::domain::sale::ProductRef;

    #[test]
    fn report_has_two_lines_with_two_decimals() {
        let report = SalesReport::new(Decimal::from(6), Duration::from_millis(1234));

        assert_eq!(report.render(), "Total ventas: $6.00\nTiempo ejecución: 1.23s");
    }

    #[test]
    fn amounts_round_half_to_even() {
        assert_eq!(format_amount(Decimal::new(125, 3)), "0.12");
        assert_eq!(format_amount(Decimal::new(135, 3)), "0.14");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "12.34");
        assert_eq!(format_amount(Decimal::new(12346, 3)), "12.35");
        assert_eq!(format_amount(Decimal::new(-12345, 3)), "-12.34");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::new(25, 1)), "2.50");
    }

    #[test]
    fn write_overwrites_existing_content() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("sales_results.txt");
        fs::write(&path, "stale content that is longer than the report\nand more").expect("seed");

        let report = SalesReport::new(Decimal::new(2505, 2), Duration::ZERO);
        report.write_to(&path).expect("report should be written");

        let written = fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "Total ventas: $25.05\nTiempo ejecución: 0.00s");
    }

    #[test]
    fn write_into_missing_directory_fails_with_path() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("missing").join("sales_results.txt");

        let error = SalesReport::new(Decimal::ONE, Duration::ZERO)
            .write_to(&path)
            .expect_err("parent directory does not exist");

        assert_eq!(error.path, path);
        assert!(error.diagnostic().contains("sales_results.txt"));
    }

    #[test]
    fn unmatched_block_is_header_plus_joined_names() {
        let unmatched: BTreeSet<ProductRef> = ["Stapler", "Eraser"]
            .into_iter()
            .map(|name| ProductRef::Title(name.to_string()))
            .collect();

        assert_eq!(
            render_unmatched(&unmatched).as_deref(),
            Some("Productos no encontrados en el catálogo:\nEraser, Stapler")
        );
        assert_eq!(render_unmatched(&BTreeSet::new()), None);
    }
}
