//! mtscan output files.
//!
//! The whole map of access points is serialized to one JSON object keyed by
//! MAC, optionally gzip compressed, and written in a single call after any
//! previous file at the target path has been removed.

use crate::aggregate::AccessPointMap;
use crate::error::{ConvertError, ConvertResult};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Plain mtscan file extension.
pub const MTSCAN_EXTENSION: &str = ".mtscan";
/// Gzip compressed mtscan file extension.
pub const MTSCAN_GZ_EXTENSION: &str = ".mtscan.gz";

/// Whether the output buffer is gzip compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCompression {
    /// Plain JSON.
    None,
    /// Gzip compressed JSON.
    Gzip,
}

impl OutputCompression {
    /// Picks the compression from the output file name.
    ///
    /// Returns `None` when the name ends in neither `.mtscan` nor `.mtscan.gz`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(MTSCAN_GZ_EXTENSION) {
            Some(OutputCompression::Gzip)
        } else if name.ends_with(MTSCAN_EXTENSION) {
            Some(OutputCompression::None)
        } else {
            None
        }
    }
}

impl fmt::Display for OutputCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputCompression::None => write!(f, "none"),
            OutputCompression::Gzip => write!(f, "gzip"),
        }
    }
}

/// Serializes and writes an access point map.
#[derive(Debug, Clone, Copy)]
pub struct MtscanWriter {
    compression: OutputCompression,
    level: Compression,
}

impl MtscanWriter {
    /// Creates a writer with the default gzip level.
    pub fn new(compression: OutputCompression) -> Self {
        Self {
            compression,
            level: Compression::default(),
        }
    }

    /// Sets the gzip level (0-9).
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Compression::new(level.min(9));
        self
    }

    /// Encodes the map into the bytes that go to disk.
    pub fn encode(&self, records: &AccessPointMap) -> ConvertResult<Vec<u8>> {
        let json = serde_json::to_vec(records)?;

        match self.compression {
            OutputCompression::None => Ok(json),
            OutputCompression::Gzip => {
                let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 4), self.level);
                encoder.write_all(&json)?;
                Ok(encoder.finish()?)
            }
        }
    }

    /// Replaces `path` with the encoded map. Returns the number of bytes written.
    pub fn write(&self, path: &Path, records: &AccessPointMap) -> ConvertResult<usize> {
        let bytes = self.encode(records)?;

        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                ConvertError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to remove existing '{}': {}", path.display(), e),
                ))
            })?;
        }

        fs::write(path, &bytes)?;
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            compression = %self.compression,
            "Output written"
        );
        Ok(bytes.len())
    }
}
