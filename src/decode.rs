//! Field decoders.
//!
//! Pure functions turning raw WiGLE column text into typed values. None of
//! them fail: malformed input degrades to a sentinel (`0`, an empty key, an
//! all-false [`EncryptionInfo`]) and the caller decides what to do with it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Bracketed capability tokens, e.g. `[WPA2-PSK-CCMP][ESS]`.
#[allow(clippy::expect_used)]
static BRACKET_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("bracket token pattern is valid"));

/// Highest 2.4 GHz channel; anything above belongs to the 5 GHz band.
pub const MAX_24GHZ_CHANNEL: i64 = 14;

/// Frequency band selection for the row filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Band {
    /// No band filtering.
    #[default]
    All,
    /// 2.4 GHz only (channels up to 14).
    Band24,
    /// 5 GHz only (channels from 15).
    Band50,
}

impl Band {
    /// Returns true if a row on `channel` belongs to this band selection.
    pub fn admits(self, channel: i64) -> bool {
        match self {
            Band::All => true,
            Band::Band24 => channel <= MAX_24GHZ_CHANNEL,
            Band::Band50 => channel > MAX_24GHZ_CHANNEL,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::All => write!(f, "all"),
            Band::Band24 => write!(f, "2.4GHz"),
            Band::Band50 => write!(f, "5GHz"),
        }
    }
}

/// Encryption flags decoded from the WiGLE `AuthMode` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncryptionInfo {
    /// WEP advertised.
    pub wep: bool,
    /// WPA (version 1) advertised.
    pub wpa: bool,
    /// WPA2 advertised.
    pub wpa2: bool,
    /// WPA3 advertised.
    pub wpa3: bool,
}

impl EncryptionInfo {
    /// True when any of the encryption schemes is present.
    pub fn secured(&self) -> bool {
        self.wep || self.wpa || self.wpa2 || self.wpa3
    }
}

/// Normalizes a MAC address into its key form.
///
/// The value is upper-cased and every character outside `[0-9A-F]` is
/// dropped. Length is not checked, so a malformed address yields a shorter key.
pub fn decode_mac(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| matches!(c, '0'..='9' | 'A'..='F'))
        .collect()
}

/// Maps a channel number to its centre frequency in MHz.
///
/// Channels 1-14 map to `2407 + 5 * ch`, channels 32-180 to `5000 + 5 * ch`.
/// Anything else returns 0, meaning the row cannot be used.
pub fn channel_to_frequency(channel: i64) -> u32 {
    match channel {
        1..=14 => (2407 + 5 * channel) as u32,
        32..=180 => (5000 + 5 * channel) as u32,
        _ => 0,
    }
}

/// Decodes the raw channel column into a frequency, see [`channel_to_frequency`].
pub fn decode_frequency(channel_field: &str) -> u32 {
    channel_to_frequency(parse_leading_int(channel_field))
}

/// Scans the capability text for bracketed tokens and sets the matching flags.
pub fn decode_encryption(raw: &str) -> EncryptionInfo {
    let mut info = EncryptionInfo::default();

    for caps in BRACKET_TOKEN.captures_iter(raw) {
        let token = &caps[1];
        if token.starts_with("WEP") {
            info.wep = true;
        } else if let Some(rest) = token.strip_prefix("WPA") {
            match rest.chars().next() {
                Some('2') => info.wpa2 = true,
                Some('3') => info.wpa3 = true,
                Some(c) if c.is_ascii_digit() => {}
                _ => info.wpa = true,
            }
        }
    }

    info
}

/// Maps a user supplied band selector to a [`Band`].
///
/// The match is exact; unknown values, including padded ones like `" 5 "`,
/// fall back to [`Band::All`].
pub fn decode_band(input: &str) -> Band {
    match input {
        "2" | "2.3" | "2.4" | "2.5" => Band::Band24,
        "5" | "5.0" | "5.1" | "5.2" | "5.3" | "5.4" | "5.5" | "5.6" | "5.7" | "5.8" | "5.9" => {
            Band::Band50
        }
        _ => Band::All,
    }
}

/// Parses the leading integer of a field, `0` when there is none.
///
/// Surrounding whitespace and an optional sign are accepted; parsing stops at
/// the first non-digit, so `"6abc"` yields 6.
pub fn parse_leading_int(field: &str) -> i64 {
    let trimmed = field.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let value = digits[..end].parse::<i64>().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}

/// Parses a coordinate column, `0.0` when it is not a finite number.
pub fn parse_coordinate(field: &str) -> f64 {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Decodes SSID bytes as UTF-8, falling back to ISO-8859-1.
pub fn decode_ssid(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_owned(),
        Err(_) => raw.iter().map(|&b| char::from(b)).collect(),
    }
}
