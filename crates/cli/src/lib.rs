pub mod commands;
pub mod exit_codes;
pub mod logging;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use salestotal_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

use crate::commands::compute::{self, ComputeRequest};
use crate::commands::CommandResult;
use crate::exit_codes::{EXIT_CONFIG, EXIT_SUCCESS, EXIT_USAGE};

pub const USAGE: &str = "Uso: salestotal product_list.json sales_record.json";

#[derive(Debug, Parser)]
#[command(
    name = "salestotal",
    version,
    about = "Compute the sales total from a product catalog and a sales record",
    long_about = "Price every sale record against the product catalog, print the total and the elapsed time, and overwrite the report file with both lines.",
    after_help = "Examples:\n  salestotal product_list.json sales_record.json\n  salestotal --json --output out/results.txt catalog.json sales.json"
)]
pub struct Cli {
    #[arg(value_name = "FILE", help = "Product catalog JSON followed by sales record JSON")]
    files: Vec<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Report file to overwrite (default: sales_results.txt)")]
    output: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Read settings from this TOML file")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "LEVEL", help = "Log verbosity on stderr: trace|debug|info|warn|error")]
    log_level: Option<String>,
    #[arg(long, value_name = "FORMAT", help = "Log format on stderr: compact|pretty|json")]
    log_format: Option<String>,
    #[arg(long, help = "Emit machine-readable JSON output")]
    json: bool,
}

pub fn run() -> ExitCode {
    let result = run_from(std::env::args_os());

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

pub fn run_from<I, T>(args: I) -> CommandResult
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => execute(cli),
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                CommandResult::text(EXIT_SUCCESS, error.to_string().trim_end())
            }
            _ => CommandResult::text(
                EXIT_USAGE,
                format!("{}\n{USAGE}", error.to_string().trim_end()),
            ),
        },
    }
}

pub fn execute(cli: Cli) -> CommandResult {
    // Checked before config so a bad invocation touches no file at all.
    let (catalog_path, sales_path) = match <[PathBuf; 2]>::try_from(cli.files) {
        Ok([catalog_path, sales_path]) => (catalog_path, sales_path),
        Err(_) => return CommandResult::text(EXIT_USAGE, USAGE),
    };

    let config = cli
        .log_format
        .as_deref()
        .map(str::parse::<LogFormat>)
        .transpose()
        .and_then(|log_format| {
            AppConfig::load(LoadOptions {
                config_path: cli.config,
                overrides: ConfigOverrides {
                    output_path: cli.output,
                    log_level: cli.log_level,
                    log_format,
                },
            })
        });
    let config = match config {
        Ok(config) => config,
        Err(error) if cli.json => {
            return CommandResult::failure(
                "compute",
                "config_validation",
                error.to_string(),
                EXIT_CONFIG,
            );
        }
        Err(error) => {
            return CommandResult::text(EXIT_CONFIG, format!("Error: configuración inválida: {error}"));
        }
    };

    if let Err(error) = logging::init(&config.logging) {
        tracing::debug!(
            event_name = "system.logging.reused",
            error = %error,
            "keeping previously installed subscriber"
        );
    }

    compute::run(&ComputeRequest {
        catalog_path,
        sales_path,
        output_path: config.output.path,
        json: cli.json,
    })
}
