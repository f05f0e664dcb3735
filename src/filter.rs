//! Row admission.
//!
//! Checks run in a fixed order and the first failure decides how the row is
//! counted:
//!
//! 1. fewer than [`MIN_COLUMNS`] fields: malformed
//! 2. type column other than `WIFI`: non-WiFi
//! 3. channel outside the selected band: filtered
//! 4. timestamp before the start or after the end of the window: filtered
//! 5. channel without a known frequency: malformed
//!
//! A row that passes comes out fully decoded as an [`AcceptedRow`].

use crate::decode::{
    channel_to_frequency, decode_encryption, decode_mac, decode_ssid, parse_coordinate,
    parse_leading_int, Band,
};
use crate::timestamp::parse_row_timestamp;
use crate::wigle::{column, RawRow, MIN_COLUMNS, WIFI_TYPE};
use std::fmt;

/// Why a row was not aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Too few columns or a channel with no known frequency.
    Malformed,
    /// Bluetooth, BLE or cellular sighting.
    NonWifi,
    /// WiFi row outside the selected band or time window.
    Filtered,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Malformed => write!(f, "malformed"),
            Rejection::NonWifi => write!(f, "non-wifi"),
            Rejection::Filtered => write!(f, "filtered"),
        }
    }
}

/// A row that passed every check, with all fields decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedRow {
    /// MAC key, see [`decode_mac`].
    pub mac: String,
    /// SSID as UTF-8.
    pub ssid: String,
    /// Centre frequency in MHz, never 0.
    pub frequency_mhz: u32,
    /// Whether any encryption was advertised.
    pub secured: bool,
    /// Epoch seconds, 0 when the time column was unreadable.
    pub timestamp: i64,
    /// Signal strength in dBm.
    pub signal: i64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Inclusive time window in epoch seconds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    /// Earliest admitted timestamp.
    pub start: Option<i64>,
    /// Latest admitted timestamp.
    pub end: Option<i64>,
}

impl TimeWindow {
    /// Creates a window from optional bounds.
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// Returns true if `ts` lies inside the window.
    ///
    /// An end bound of 0 or less is treated as unset.
    pub fn contains(&self, ts: i64) -> bool {
        if let Some(start) = self.start {
            if ts < start {
                return false;
            }
        }
        match self.end {
            Some(end) if end > 0 => ts <= end,
            _ => true,
        }
    }
}

/// Applies band and time selection to raw rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowFilter {
    band: Band,
    window: TimeWindow,
}

impl RowFilter {
    /// Creates a filter for a band and time window.
    pub fn new(band: Band, window: TimeWindow) -> Self {
        Self { band, window }
    }

    /// Selected band.
    pub fn band(&self) -> Band {
        self.band
    }

    /// Selected time window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Classifies a row, decoding it when it is admitted.
    pub fn check(&self, row: &RawRow) -> Result<AcceptedRow, Rejection> {
        if row.len() < MIN_COLUMNS {
            return Err(Rejection::Malformed);
        }

        if row.bytes(column::TYPE) != WIFI_TYPE.as_bytes() {
            return Err(Rejection::NonWifi);
        }

        let channel = parse_leading_int(&row.text(column::CHANNEL));
        if !self.band.admits(channel) {
            return Err(Rejection::Filtered);
        }

        let timestamp = parse_row_timestamp(&row.text(column::TIME));
        if !self.window.contains(timestamp) {
            return Err(Rejection::Filtered);
        }

        let frequency_mhz = channel_to_frequency(channel);
        if frequency_mhz == 0 {
            return Err(Rejection::Malformed);
        }

        Ok(AcceptedRow {
            mac: decode_mac(&row.text(column::MAC)),
            ssid: decode_ssid(row.bytes(column::SSID)),
            frequency_mhz,
            secured: decode_encryption(&row.text(column::ENCRYPTION)).secured(),
            timestamp,
            signal: parse_leading_int(&row.text(column::SIGNAL)),
            latitude: parse_coordinate(&row.text(column::LAT)),
            longitude: parse_coordinate(&row.text(column::LON)),
        })
    }
}
