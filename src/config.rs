//! Configuration for the converter.
//!
//! Settings that rarely change between runs live in [`ConverterConfig`],
//! loaded with Figment from:
//! 1. `wigle2mtscan.toml` (or the file given with `--config`), when present
//! 2. Environment variables prefixed with `WIGLE2MTSCAN_`
//!
//! Everything that describes one particular conversion (paths, band, date
//! window) comes from the command line and ends up in [`RunOptions`].
//!
//! # Example
//! ```no_run
//! use wigle2mtscan::config::ConverterConfig;
//!
//! let config = ConverterConfig::load()?;
//! println!("Log level: {}", config.log_level);
//! # Ok::<(), wigle2mtscan::error::ConvertError>(())
//! ```

use crate::decode::{decode_band, Band};
use crate::error::{ConvertError, ConvertResult};
use crate::filter::TimeWindow;
use crate::output::OutputCompression;
use crate::timestamp::{is_bare_date, parse_timestamp, SECONDS_PER_DAY};
use crate::validation;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "wigle2mtscan.toml";

/// Prefix for environment overrides, e.g. `WIGLE2MTSCAN_LOG_LEVEL=debug`.
pub const ENV_PREFIX: &str = "WIGLE2MTSCAN_";

/// Accepted log levels.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Accepted log output formats.
pub const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Converter-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// Lines skipped at the top of the input (preamble + column names)
    #[serde(default = "default_header_lines")]
    pub header_lines: usize,
    /// Gzip level for `.mtscan.gz` output (0-9)
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_header_lines() -> usize {
    2
}

fn default_compression_level() -> u32 {
    6
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            header_lines: default_header_lines(),
            compression_level: default_compression_level(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from `wigle2mtscan.toml` and environment variables.
    pub fn load() -> ConvertResult<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment apply.
    pub fn load_from<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(&self) -> ConvertResult<()> {
        validation::is_one_of(&self.log_level, LOG_LEVELS).map_err(ConvertError::Configuration)?;
        validation::is_one_of(&self.log_format, LOG_FORMATS)
            .map_err(ConvertError::Configuration)?;

        validation::is_in_range(self.compression_level, 0..=9).map_err(|_| {
            ConvertError::Configuration(format!(
                "Invalid compression_level {}. Must be 0-9",
                self.compression_level
            ))
        })?;

        Ok(())
    }
}

/// Unvalidated options for one conversion, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Input CSV path.
    pub input: String,
    /// Output path, `.mtscan` or `.mtscan.gz`.
    pub output: String,
    /// Lower time bound.
    pub date_from: Option<String>,
    /// Upper time bound.
    pub date_to: Option<String>,
    /// Band selector, see [`decode_band`].
    pub band: Option<String>,
}

/// Validated options for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Existing input file.
    pub input: PathBuf,
    /// Output file.
    pub output: PathBuf,
    /// Derived from the output extension.
    pub compression: OutputCompression,
    /// Selected band.
    pub band: Band,
    /// Time window in epoch seconds.
    pub window: TimeWindow,
}

impl RunOptions {
    /// Validates a request.
    ///
    /// The end date must not be earlier than the start date. A bare
    /// `YYYY-MM-DD` end date then covers that whole day.
    pub fn from_request(request: &RunRequest) -> ConvertResult<Self> {
        validation::is_valid_path(&request.input).map_err(config_error)?;
        let input = PathBuf::from(&request.input);
        validation::is_existing_file(&input).map_err(ConvertError::Configuration)?;

        validation::is_valid_path(&request.output).map_err(config_error)?;
        let output = PathBuf::from(&request.output);
        let compression = validation::output_compression(&output).map_err(config_error)?;

        let start = request
            .date_from
            .as_deref()
            .map(|raw| parse_cli_date(raw, "date from"))
            .transpose()?;

        let end = request
            .date_to
            .as_deref()
            .map(|raw| parse_cli_date(raw, "date to"))
            .transpose()?;

        // Compared as given; the whole-day extension comes afterwards
        validation::is_valid_date_range(start, end).map_err(config_error)?;

        let end = match (end, request.date_to.as_deref()) {
            (Some(ts), Some(raw)) if is_bare_date(raw) => Some(ts + SECONDS_PER_DAY),
            (end, _) => end,
        };

        let band = request.band.as_deref().map(decode_band).unwrap_or_default();

        Ok(Self {
            input,
            output,
            compression,
            band,
            window: TimeWindow::new(start, end),
        })
    }
}

fn config_error(message: &str) -> ConvertError {
    ConvertError::Configuration(message.to_string())
}

fn parse_cli_date(raw: &str, label: &str) -> ConvertResult<i64> {
    parse_timestamp(raw).ok_or_else(|| {
        ConvertError::Configuration(format!(
            "Cannot parse {label} '{raw}'. Please specify an ISO-8601 like date, YYYY-MM-DD is sufficient"
        ))
    })
}
