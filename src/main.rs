//! CLI Entry Point for wigle2mtscan
//!
//! Converts a WiGLE CSV export into an `.mtscan` or `.mtscan.gz` file.
//!
//! # Usage
//!
//! ```bash
//! wigle2mtscan -i WigleWifi_20230101.csv -o scan.mtscan.gz --datefrom 2023-01-01 -b 5
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use wigle2mtscan::config::{ConverterConfig, RunOptions, RunRequest, DEFAULT_CONFIG_FILE};
use wigle2mtscan::{logging, pipeline};

#[derive(Parser, Debug)]
#[command(name = "wigle2mtscan", version)]
#[command(about = "Converts WiGLE CSV exports into mtscan files", long_about = None)]
#[command(after_help = "Supported output file types: .mtscan, .mtscan.gz\n\
Dates should be ISO-8601 like, YYYY-MM-DD is sufficient; \"date to\" must not be older than \"date from\".")]
struct Cli {
    /// Input WiGLE CSV file
    #[arg(short, long, value_name = "PATH")]
    input: String,

    /// Output file (.mtscan or .mtscan.gz)
    #[arg(short, long, value_name = "PATH")]
    output: String,

    /// Parse rows only from this date
    #[arg(short = 'f', long = "datefrom", visible_alias = "date-from", value_name = "DATE")]
    date_from: Option<String>,

    /// Parse rows only up to this date (a bare date covers the whole day)
    #[arg(short = 't', long = "dateto", visible_alias = "date-to", value_name = "DATE")]
    date_to: Option<String>,

    /// 2 or 2.4 for 2.4GHz, 5 or 5.0-5.9 for 5GHz
    #[arg(short = 'b', long = "bandtype", visible_alias = "band", value_name = "BAND")]
    band: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ConverterConfig::load_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if let Some(level) = cli.log_level {
        config.log_level = level;
        config.validate()?;
    }

    logging::init_from_config(&config).map_err(anyhow::Error::msg)?;

    let request = RunRequest {
        input: cli.input,
        output: cli.output,
        date_from: cli.date_from,
        date_to: cli.date_to,
        band: cli.band,
    };
    let options = RunOptions::from_request(&request)?;

    let stats = pipeline::run(&options, &config)
        .with_context(|| format!("Conversion of {} failed", options.input.display()))?;

    print!("{stats}");
    Ok(())
}
