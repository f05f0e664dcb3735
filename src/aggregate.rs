//! Access point aggregation.
//!
//! Every accepted row is a sighting of one access point. The first sighting
//! of a MAC key creates its [`AccessPointRecord`]; later sightings append a
//! sample, move `last` forward and may replace the best signal together with
//! its coordinates. Records are never removed during a run.
//!
//! Field names on the serialized record follow the mtscan file format.

use crate::filter::{AcceptedRow, Rejection};
use crate::stats::{IngestOutcome, RunStatistics};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Access point records keyed by MAC, iterated in key order.
pub type AccessPointMap = BTreeMap<String, AccessPointRecord>;

/// Channel width label; WiGLE exports do not record it.
pub const DEFAULT_CHANNEL_LABEL: &str = "20";

/// One sighting of an access point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservedSample {
    /// Epoch seconds.
    #[serde(rename = "t")]
    pub timestamp: i64,
    /// Signal strength in dBm.
    #[serde(rename = "s")]
    pub signal: i64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl From<&AcceptedRow> for ObservedSample {
    fn from(row: &AcceptedRow) -> Self {
        Self {
            timestamp: row.timestamp,
            signal: row.signal,
            lat: row.latitude,
            lon: row.longitude,
        }
    }
}

/// Aggregated observations of a single access point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessPointRecord {
    /// Centre frequency in MHz.
    #[serde(rename = "freq")]
    pub frequency_mhz: u32,
    /// Channel width label, always [`DEFAULT_CHANNEL_LABEL`].
    #[serde(rename = "chan")]
    pub channel_label: String,
    pub mode: String,
    /// Network name from the first sighting.
    pub ssid: String,
    /// Device name; WiGLE has none, so this is empty.
    pub name: String,
    /// Strongest signal seen, in dBm.
    #[serde(rename = "s")]
    pub best_signal: i64,
    /// Whether any encryption was advertised.
    #[serde(rename = "priv", serialize_with = "bool_as_int")]
    pub secured: bool,
    /// Timestamp of the first sighting.
    #[serde(rename = "first")]
    pub first_seen: i64,
    /// Timestamp of the latest sighting.
    #[serde(rename = "last")]
    pub last_seen: i64,
    /// Latitude at the strongest signal.
    #[serde(rename = "lat")]
    pub best_lat: f64,
    /// Longitude at the strongest signal.
    #[serde(rename = "lon")]
    pub best_lon: f64,
    /// Every sighting in input order.
    #[serde(rename = "signals")]
    pub samples: Vec<ObservedSample>,
}

fn bool_as_int<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

impl AccessPointRecord {
    /// Creates a record from the first accepted sighting.
    pub fn first_sighting(row: &AcceptedRow) -> Self {
        Self {
            frequency_mhz: row.frequency_mhz,
            channel_label: DEFAULT_CHANNEL_LABEL.to_string(),
            mode: String::new(),
            ssid: row.ssid.clone(),
            name: String::new(),
            best_signal: row.signal,
            secured: row.secured,
            first_seen: row.timestamp,
            last_seen: row.timestamp,
            best_lat: row.latitude,
            best_lon: row.longitude,
            samples: vec![ObservedSample::from(row)],
        }
    }

    /// Folds a later sighting into the record.
    ///
    /// Frequency, SSID and `secured` stay as first seen. `last_seen` follows
    /// processing order, not chronological order.
    pub fn merge(&mut self, row: &AcceptedRow) {
        self.last_seen = row.timestamp;

        if row.signal > self.best_signal {
            self.best_signal = row.signal;
            self.best_lat = row.latitude;
            self.best_lon = row.longitude;
        }

        self.samples.push(ObservedSample::from(row));
    }
}

/// Owns every access point record of a run plus the row counters.
#[derive(Debug, Default)]
pub struct Aggregator {
    records: AccessPointMap,
    stats: RunStatistics,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an accepted row, creating or updating its record.
    pub fn ingest(&mut self, row: AcceptedRow) -> IngestOutcome {
        let outcome = match self.records.get_mut(&row.mac) {
            Some(record) => {
                record.merge(&row);
                IngestOutcome::Merged
            }
            None => {
                let record = AccessPointRecord::first_sighting(&row);
                self.records.insert(row.mac, record);
                IngestOutcome::Found
            }
        };

        self.stats.record_outcome(outcome);
        outcome
    }

    /// Counts a row that did not make it past the filter.
    pub fn reject(&mut self, rejection: Rejection) {
        self.stats.record_rejection(rejection);
    }

    /// Looks up a record by MAC key.
    pub fn get(&self, mac: &str) -> Option<&AccessPointRecord> {
        self.records.get(mac)
    }

    /// Number of distinct access points.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true before the first accepted row.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counters so far.
    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    /// Records so far.
    pub fn records(&self) -> &AccessPointMap {
        &self.records
    }

    /// Consumes the aggregator, handing out the final state.
    pub fn finish(self) -> (AccessPointMap, RunStatistics) {
        (self.records, self.stats)
    }
}
