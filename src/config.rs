use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Scan windows used by the extraction heuristics.
///
/// These bound how far the heuristics look; they are not limits on sheet
/// size. Every field is optional in the JSON form and falls back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Rows examined from the top when searching for the header row.
    pub header_scan_rows: u32,
    /// Columns examined per row when searching for the header row.
    pub header_scan_cols: u32,
    /// Rows examined past the header row when looking for the first ledger row.
    pub data_start_lookahead: u32,
    /// Columns read per row when capturing free-text lines above the header.
    pub header_line_scan_cols: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_scan_rows: 40,
            header_scan_cols: 40,
            data_start_lookahead: 25,
            header_line_scan_cols: 40,
        }
    }
}

impl ExtractOptions {
    /// Loads options from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
