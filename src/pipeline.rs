//! Single-pass conversion driver.
//!
//! Reads rows one at a time, runs each through the [`RowFilter`], feeds
//! survivors to the [`Aggregator`] and, once the input is exhausted, writes
//! the aggregate with [`MtscanWriter`]. A row is fully handled before the
//! next one is read.

use crate::aggregate::{AccessPointMap, Aggregator};
use crate::config::{ConverterConfig, RunOptions};
use crate::error::ConvertResult;
use crate::filter::RowFilter;
use crate::output::MtscanWriter;
use crate::stats::RunStatistics;
use crate::wigle::{RawRow, WigleReader};
use std::io::Read;
use tracing::{debug, info};

/// Result of a finished conversion.
#[derive(Debug)]
pub struct Conversion {
    /// Access points keyed by MAC.
    pub records: AccessPointMap,
    /// Row counters.
    pub stats: RunStatistics,
}

/// Aggregates every row of an iterator.
pub fn aggregate_rows<I>(rows: I, filter: &RowFilter) -> ConvertResult<Conversion>
where
    I: IntoIterator<Item = ConvertResult<RawRow>>,
{
    let mut aggregator = Aggregator::new();

    for row in rows {
        let row = row?;
        match filter.check(&row) {
            Ok(accepted) => {
                aggregator.ingest(accepted);
            }
            Err(rejection) => {
                debug!(line = row.line, %rejection, "Row skipped");
                aggregator.reject(rejection);
            }
        }
    }

    let (records, stats) = aggregator.finish();
    Ok(Conversion { records, stats })
}

/// Aggregates a WiGLE CSV stream.
pub fn convert_reader<R: Read>(
    source: R,
    filter: &RowFilter,
    header_lines: usize,
) -> ConvertResult<Conversion> {
    aggregate_rows(WigleReader::from_reader(source, header_lines), filter)
}

/// Runs a full conversion from input file to output file.
pub fn run(options: &RunOptions, config: &ConverterConfig) -> ConvertResult<RunStatistics> {
    info!(
        input = %options.input.display(),
        output = %options.output.display(),
        band = %options.band,
        from = ?options.window.start,
        to = ?options.window.end,
        "Converting WiGLE export"
    );

    let filter = RowFilter::new(options.band, options.window);
    let reader = WigleReader::open(&options.input, config.header_lines)?;
    let conversion = aggregate_rows(reader, &filter)?;

    info!(
        access_points = conversion.records.len(),
        rows = conversion.stats.total(),
        "Input consumed"
    );

    MtscanWriter::new(options.compression)
        .with_level(config.compression_level)
        .write(&options.output, &conversion.records)?;

    Ok(conversion.stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Band;
    use crate::filter::TimeWindow;

    const INPUT: &str = "\
WigleWifi-1.4,appRelease=2.26
MAC,SSID,AuthMode,FirstSeen,Channel,RSSI,CurrentLatitude,CurrentLongitude,AltitudeMeters,AccuracyMeters,Type
AA:BB:CC:DD:EE:FF,Home,[WPA2-PSK-CCMP][ESS],2023-01-01T10:00:00Z,6,-50,40.0,-74.0,10,5,WIFI
AA:BB:CC:DD:EE:FF,Home,[WPA2-PSK-CCMP][ESS],2023-01-01T10:05:00Z,6,-40,40.1,-74.1,10,5,WIFI
11:22:33:44:55:66,Headset,Misc [BT],2023-01-01T10:06:00Z,0,-70,40.0,-74.0,10,5,BT
00:11:22:33:44:55,Cafe,[ESS],2023-01-01T10:07:00Z,40,-60,40.2,-74.2,10,5,WIFI
00:11:22:33:44:99,Bad,[ESS],2023-01-01T10:07:00Z,200,-60,40.2,-74.2,10,5,WIFI
broken,row
";

    #[test]
    fn test_scenario_counts() {
        let conv = convert_reader(INPUT.as_bytes(), &RowFilter::default(), 2).unwrap();

        assert_eq!(conv.records.len(), 2);
        assert_eq!(conv.stats.found, 2);
        assert_eq!(conv.stats.merged, 1);
        assert_eq!(conv.stats.non_wifi, 1);
        assert_eq!(conv.stats.malformed, 2);
        assert_eq!(conv.stats.filtered, 0);

        let home = &conv.records["AABBCCDDEEFF"];
        assert_eq!(home.frequency_mhz, 2437);
        assert!(home.secured);
        assert_eq!(home.best_signal, -40);
        assert_eq!(home.last_seen, 1_672_567_500);
        assert_eq!(home.samples.len(), 2);

        let cafe = &conv.records["001122334455"];
        assert_eq!(cafe.frequency_mhz, 5200);
        assert!(!cafe.secured);
    }

    #[test]
    fn test_band_filter_counts_as_filtered() {
        let filter = RowFilter::new(Band::Band24, TimeWindow::default());
        let conv = convert_reader(INPUT.as_bytes(), &filter, 2).unwrap();

        assert!(!conv.records.contains_key("001122334455"));
        // Channel 40 and channel 200 rows
        assert_eq!(conv.stats.filtered, 2);
        assert_eq!(conv.stats.malformed, 1);
    }

    #[test]
    fn test_every_row_counted_once() {
        let conv = convert_reader(INPUT.as_bytes(), &RowFilter::default(), 2).unwrap();
        assert_eq!(conv.stats.total(), 6);
    }

    #[test]
    fn test_blank_lines_count_as_bad_rows() {
        let input = "\
WigleWifi-1.4,appRelease=2.26
MAC,SSID,AuthMode,FirstSeen,Channel,RSSI,CurrentLatitude,CurrentLongitude,AltitudeMeters,AccuracyMeters,Type
AA:BB:CC:DD:EE:FF,Home,[ESS],2023-01-01T10:00:00Z,6,-50,40.0,-74.0,10,5,WIFI


AA:BB:CC:DD:EE:FF,Home,[ESS],2023-01-01T10:05:00Z,6,-40,40.0,-74.0,10,5,WIFI
";
        let conv = convert_reader(input.as_bytes(), &RowFilter::default(), 2).unwrap();

        assert_eq!(conv.stats.malformed, 2);
        assert_eq!(conv.stats.merged, 1);
        assert_eq!(conv.stats.found, 1);
        assert_eq!(conv.stats.total(), 4);
        assert_eq!(
            conv.stats.to_string(),
            "Found bad rows: 2\nMerged wifi rows: 1\nFound wifi rows: 1\n"
        );
    }
}
