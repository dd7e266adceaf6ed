use std::path::PathBuf;

use salestotal_core::pipeline::{compute, PipelineOutcome};
use salestotal_core::report::{format_amount, render_unmatched};
use serde::Serialize;

use crate::commands::{escape_json, CommandResult};
use crate::exit_codes::{pipeline_exit_code, EXIT_REPORT_WRITE, EXIT_SUCCESS};

#[derive(Clone, Debug)]
pub struct ComputeRequest {
    pub catalog_path: PathBuf,
    pub sales_path: PathBuf,
    pub output_path: PathBuf,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ComputeReport {
    command: &'static str,
    status: &'static str,
    total: String,
    elapsed_secs: f64,
    matched_records: usize,
    catalog_products: usize,
    unmatched_products: Vec<String>,
    unpriced_products: Vec<String>,
    invalid_quantity_products: Vec<String>,
    duplicate_titles: Vec<String>,
    output_path: String,
}

pub fn run(request: &ComputeRequest) -> CommandResult {
    let outcome = match compute(&request.catalog_path, &request.sales_path) {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::error!(
                event_name = "sales.pipeline.aborted",
                error_class = error.error_class(),
                error = %error,
                "sales pipeline aborted; no report written"
            );
            let exit_code = pipeline_exit_code(&error);
            if request.json {
                return CommandResult::failure(
                    "compute",
                    error.error_class(),
                    error.to_string(),
                    exit_code,
                );
            }
            return CommandResult::text(exit_code, error.diagnostic());
        }
    };

    let report = outcome.report();
    let mut lines = Vec::new();
    if !request.json {
        if let Some(unmatched) = render_unmatched(&outcome.aggregation.unmatched) {
            lines.push(unmatched);
        }
        lines.push(report.render());
    }

    if let Err(error) = report.write_to(&request.output_path) {
        tracing::error!(
            event_name = "sales.report.write_failed",
            error = %error,
            "sales report could not be written"
        );
        if request.json {
            return CommandResult::failure(
                "compute",
                "report_write",
                error.to_string(),
                EXIT_REPORT_WRITE,
            );
        }
        lines.push(error.diagnostic());
        return CommandResult::text(EXIT_REPORT_WRITE, lines.join("\n"));
    }

    if request.json {
        return CommandResult::text(EXIT_SUCCESS, render_json(&outcome, request));
    }

    CommandResult::text(EXIT_SUCCESS, lines.join("\n"))
}

fn render_json(outcome: &PipelineOutcome, request: &ComputeRequest) -> String {
    let payload = ComputeReport {
        command: "compute",
        status: "ok",
        total: format_amount(outcome.aggregation.total),
        elapsed_secs: outcome.elapsed.as_secs_f64(),
        matched_records: outcome.aggregation.matched_records,
        catalog_products: outcome.catalog_size,
        unmatched_products: outcome.aggregation.unmatched_names(),
        unpriced_products: outcome.aggregation.unpriced.iter().cloned().collect(),
        invalid_quantity_products: outcome.aggregation.invalid_quantities.iter().cloned().collect(),
        duplicate_titles: outcome.duplicate_titles.iter().cloned().collect(),
        output_path: request.output_path.display().to_string(),
    };

    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"compute\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            escape_json(&error.to_string())
        )
    })
}
