//! Run statistics and the end-of-run report.

use crate::filter::Rejection;
use std::fmt;
use std::io::{self, Write};

/// What happened to an accepted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// First sighting of this access point.
    Found,
    /// Merged into an existing access point.
    Merged,
}

/// Per-run row counters. Every data row bumps exactly one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Rows too short to use, including blank lines, or on an unknown channel.
    pub malformed: u64,
    /// Bluetooth and cellular rows.
    pub non_wifi: u64,
    /// WiFi rows outside the band or time window.
    pub filtered: u64,
    /// WiFi rows folded into an already known access point.
    pub merged: u64,
    /// Distinct access points.
    pub found: u64,
}

impl RunStatistics {
    /// Counts a rejected row.
    pub fn record_rejection(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Malformed => self.malformed += 1,
            Rejection::NonWifi => self.non_wifi += 1,
            Rejection::Filtered => self.filtered += 1,
        }
    }

    /// Counts an accepted row.
    pub fn record_outcome(&mut self, outcome: IngestOutcome) {
        match outcome {
            IngestOutcome::Found => self.found += 1,
            IngestOutcome::Merged => self.merged += 1,
        }
    }

    /// Total number of data rows seen.
    pub fn total(&self) -> u64 {
        self.malformed + self.non_wifi + self.filtered + self.merged + self.found
    }

    /// Writes the operator report. Zero counters are omitted, except `found`.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.malformed > 0 {
            writeln!(f, "Found bad rows: {}", self.malformed)?;
        }
        if self.non_wifi > 0 {
            writeln!(f, "Ignored non wifi rows: {}", self.non_wifi)?;
        }
        if self.filtered > 0 {
            writeln!(f, "Ignored wifi rows: {}", self.filtered)?;
        }
        if self.merged > 0 {
            writeln!(f, "Merged wifi rows: {}", self.merged)?;
        }
        writeln!(f, "Found wifi rows: {}", self.found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_row_counts_once() {
        let mut stats = RunStatistics::default();
        stats.record_rejection(Rejection::Malformed);
        stats.record_rejection(Rejection::NonWifi);
        stats.record_rejection(Rejection::NonWifi);
        stats.record_rejection(Rejection::Filtered);
        stats.record_outcome(IngestOutcome::Found);
        stats.record_outcome(IngestOutcome::Merged);

        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.non_wifi, 2);
        assert_eq!(stats.filtered, 1);
        assert_eq!(stats.found, 1);
        assert_eq!(stats.merged, 1);
        assert_eq!(stats.total(), 6);
    }

    #[test]
    fn test_report_always_has_found() {
        let mut out = Vec::new();
        RunStatistics::default().write_report(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Found wifi rows: 0\n");
    }

    #[test]
    fn test_report_lists_nonzero_counters() {
        let stats = RunStatistics {
            malformed: 2,
            non_wifi: 0,
            filtered: 3,
            merged: 4,
            found: 5,
        };
        assert_eq!(
            stats.to_string(),
            "Found bad rows: 2\nIgnored wifi rows: 3\nMerged wifi rows: 4\nFound wifi rows: 5\n"
        );
    }
}
