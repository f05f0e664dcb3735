//! WiGLE CSV input.
//!
//! A WiGLE export starts with a preamble line (`WigleWifi-1.4,appRelease=...`)
//! followed by the column names, then one row per sighting:
//!
//! ```text
//! MAC,SSID,AuthMode,FirstSeen,Channel,RSSI,CurrentLatitude,CurrentLongitude,AltitudeMeters,AccuracyMeters,Type
//! ```
//!
//! Rows are handed out as [`RawRow`]s without any interpretation; the row
//! filter decides what they mean.

use crate::error::ConvertResult;
use csv::ByteRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Column positions in a WiGLE CSV row.
pub mod column {
    /// MAC address.
    pub const MAC: usize = 0;
    /// Network name.
    pub const SSID: usize = 1;
    /// Capability string, e.g. `[WPA2-PSK-CCMP][ESS]`.
    pub const ENCRYPTION: usize = 2;
    /// First seen time.
    pub const TIME: usize = 3;
    /// Channel number.
    pub const CHANNEL: usize = 4;
    /// RSSI in dBm.
    pub const SIGNAL: usize = 5;
    /// Latitude.
    pub const LAT: usize = 6;
    /// Longitude.
    pub const LON: usize = 7;
    /// Technology type (`WIFI`, `BT`, `BLE`, `GSM`, ...).
    pub const TYPE: usize = 10;
}

/// Minimum number of columns a usable row carries.
pub const MIN_COLUMNS: usize = column::TYPE + 1;

/// Technology type of WiFi rows; BT, BLE and GSM rows use other values.
pub const WIFI_TYPE: &str = "WIFI";

/// One CSV line as read from the file.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line number in the input file.
    pub line: u64,
    record: ByteRecord,
}

impl RawRow {
    /// Wraps a parsed record.
    pub fn new(line: u64, record: ByteRecord) -> Self {
        Self { line, record }
    }

    /// Builds a row from string fields.
    pub fn from_fields<I, S>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self::new(line, fields.into_iter().collect())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.record.len()
    }

    /// Returns true for a blank line.
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Raw bytes of a field, empty when the column is missing.
    pub fn bytes(&self, index: usize) -> &[u8] {
        self.record.get(index).unwrap_or_default()
    }

    /// Field text; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self, index: usize) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.bytes(index))
    }
}

/// Streams [`RawRow`]s out of a WiGLE CSV source.
///
/// Input is split into logical lines first (a quoted field may span several
/// physical lines) and each one is parsed as a single CSV record. Blank lines
/// are returned as rows with no fields, so they still reach the row filter.
pub struct WigleReader<R: Read> {
    source: BufReader<R>,
    parser: csv::ReaderBuilder,
    header_lines: usize,
    skipped: bool,
    line: u64,
    buf: Vec<u8>,
}

impl WigleReader<File> {
    /// Opens a WiGLE export on disk.
    pub fn open(path: &Path, header_lines: usize) -> ConvertResult<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file, header_lines))
    }
}

impl<R: Read> WigleReader<R> {
    /// Wraps any reader; `header_lines` leading records are discarded.
    pub fn from_reader(source: R, header_lines: usize) -> Self {
        let mut parser = csv::ReaderBuilder::new();
        parser.has_headers(false).flexible(true);

        Self {
            source: BufReader::new(source),
            parser,
            header_lines,
            skipped: false,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Reads physical lines into `buf` until the quotes balance.
    ///
    /// Returns the 1-based line the record starts on, `None` at end of input.
    fn read_logical_line(&mut self) -> ConvertResult<Option<u64>> {
        self.buf.clear();
        let start = self.line + 1;

        loop {
            if self.source.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok((!self.buf.is_empty()).then_some(start));
            }
            self.line += 1;

            let quotes = self.buf.iter().filter(|&&b| b == b'"').count();
            if quotes % 2 == 0 {
                return Ok(Some(start));
            }
        }
    }

    /// Reads the next data row, `None` at end of input.
    pub fn next_row(&mut self) -> ConvertResult<Option<RawRow>> {
        if !self.skipped {
            self.skipped = true;
            for _ in 0..self.header_lines {
                if self.read_logical_line()?.is_none() {
                    return Ok(None);
                }
            }
        }

        let Some(line) = self.read_logical_line()? else {
            return Ok(None);
        };

        let mut record = ByteRecord::new();
        let text = trim_line_end(&self.buf);
        if !text.is_empty() {
            self.parser
                .from_reader(text)
                .read_byte_record(&mut record)?;
        }

        Ok(Some(RawRow::new(line, record)))
    }
}

fn trim_line_end(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = line {
        line = rest;
    }
    line
}

impl<R: Read> Iterator for WigleReader<R> {
    type Item = ConvertResult<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
WigleWifi-1.4,appRelease=2.26,model=Pixel,release=11,device=x,display=x,board=x,brand=x
MAC,SSID,AuthMode,FirstSeen,Channel,RSSI,CurrentLatitude,CurrentLongitude,AltitudeMeters,AccuracyMeters,Type
aa:bb:cc:dd:ee:ff,Home,[WPA2-PSK-CCMP][ESS],2023-01-01 10:00:00,6,-50,40.0,-74.0,10,5,WIFI
11:22:33:44:55:66,,Misc,2023-01-01 10:00:05,0,-70,40.0,-74.0,10,5,BT
short,row
";

    #[test]
    fn skips_header_lines() {
        let rows: Vec<RawRow> = WigleReader::from_reader(SAMPLE.as_bytes(), 2)
            .collect::<ConvertResult<_>>()
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text(column::MAC), "aa:bb:cc:dd:ee:ff");
        assert_eq!(rows[0].text(column::TYPE), WIFI_TYPE);
        assert_eq!(rows[0].line, 3);
        assert_eq!(rows[1].text(column::TYPE), "BT");
    }

    #[test]
    fn short_rows_are_returned_not_rejected() {
        let rows: Vec<RawRow> = WigleReader::from_reader(SAMPLE.as_bytes(), 2)
            .collect::<ConvertResult<_>>()
            .unwrap();

        let short = &rows[2];
        assert_eq!(short.len(), 2);
        assert!(short.len() < MIN_COLUMNS);
        assert_eq!(short.bytes(column::TYPE), b"");
    }

    #[test]
    fn input_shorter_than_header_is_empty() {
        let mut reader = WigleReader::from_reader("only a preamble\n".as_bytes(), 2);
        assert!(reader.next_row().unwrap().is_none());
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let data = "h\nh\n\"aa:bb\",\"My, Network\",[ESS],2023-01-01 10:00:00,1,-40,0,0,0,0,WIFI\n";
        let row = WigleReader::from_reader(data.as_bytes(), 2)
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(row.text(column::SSID), "My, Network");
        assert_eq!(row.len(), 11);
    }

    #[test]
    fn blank_lines_become_empty_rows() {
        let data = "h\nh\naa,Home,[ESS],2023-01-01 10:00:00,1,-40,0,0,0,0,WIFI\n\n\r\naa,Home,[ESS],2023-01-01 10:01:00,1,-40,0,0,0,0,WIFI\n";
        let rows: Vec<RawRow> = WigleReader::from_reader(data.as_bytes(), 2)
            .collect::<ConvertResult<_>>()
            .unwrap();

        assert_eq!(rows.len(), 4);
        assert!(rows[1].is_empty());
        assert_eq!(rows[1].line, 4);
        assert!(rows[2].is_empty());
        assert_eq!(rows[3].len(), 11);
        assert_eq!(rows[3].line, 6);
    }

    #[test]
    fn quoted_field_spans_lines() {
        let data = "h\nh\naa,\"two\nlines\",[ESS],2023-01-01 10:00:00,1,-40,0,0,0,0,WIFI\nbb,x\n";
        let rows: Vec<RawRow> = WigleReader::from_reader(data.as_bytes(), 2)
            .collect::<ConvertResult<_>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(column::SSID), "two\nlines");
        assert_eq!(rows[0].len(), 11);
        assert_eq!(rows[1].line, 5);
    }

    #[test]
    fn last_line_without_newline() {
        let data = "h\nh\naa,Home";
        let row = WigleReader::from_reader(data.as_bytes(), 2)
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.text(1), "Home");
    }
}
