//! # wigle2mtscan
//!
//! Converts WiGLE wardriving CSV exports into the JSON based `.mtscan`
//! format read by the mtscan radio scanner.
//!
//! ## Crate Structure
//!
//! - **`wigle`**: Reads the CSV export, skipping its two header lines.
//! - **`decode`**: Pure field decoders (MAC key, channel frequency, encryption flags, band).
//! - **`timestamp`**: Free-form date/time parsing to epoch seconds.
//! - **`filter`**: Decides whether a row is aggregated and classifies the rest.
//! - **`aggregate`**: Merges sightings of the same access point into one record.
//! - **`stats`**: Per-run row counters and the operator report.
//! - **`output`**: Serializes the aggregate, gzip compressing `.mtscan.gz` files.
//! - **`pipeline`**: Wires the pieces into a single-pass run.
//! - **`config`**: Figment based settings plus validated per-run options.
//! - **`logging`**: `tracing` subscriber setup.
//! - **`validation`**: Helpers for checking run options.
//! - **`error`**: The `ConvertError` type.

pub mod aggregate;
pub mod config;
pub mod decode;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod stats;
pub mod timestamp;
pub mod validation;
pub mod wigle;

pub use aggregate::{AccessPointMap, AccessPointRecord, Aggregator, ObservedSample};
pub use config::{ConverterConfig, RunOptions, RunRequest};
pub use error::{ConvertError, ConvertResult};
pub use filter::{AcceptedRow, Rejection, RowFilter, TimeWindow};
pub use stats::RunStatistics;
