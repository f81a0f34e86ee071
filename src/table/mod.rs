//! Scan table CSV format
//!
//! ## Columns
//!
//! | Column | `mgf` | `mgf-mzid` | Description |
//! |--------|-------|------------|-------------|
//! | scan_number | yes | yes | Native scan number |
//! | RT | yes | yes | Retention time in seconds (empty if unknown) |
//! | pepmass | yes | yes | Precursor m/z |
//! | intensity | yes | yes | Precursor intensity from `PEPMASS` |
//! | MS2_sum | yes | | Summed fragment intensity |
//! | summed_ms2_intensity | | yes | Summed fragment intensity |
//! | `<target m/z>`... | optional | optional | `yes`/`no` or matched intensity |
//! | pass_threshold | | yes | `yes` if a PSM passed the threshold |
//! | peptide | | yes | Best passing peptide sequence |

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::TableError;
pub use reader::{read_scan_table, read_scan_table_file, TableContents, TableRecord};
pub use writer::ScanTableWriter;

mod error;
mod reader;
mod writer;


/// Column names used in scan tables
pub mod columns {
    /// Native scan number
    pub const SCAN_NUMBER: &str = "scan_number";
    /// Retention time in seconds
    pub const RETENTION_TIME: &str = "RT";
    /// Precursor m/z
    pub const PEPMASS: &str = "pepmass";
    /// Precursor intensity
    pub const INTENSITY: &str = "intensity";
    /// Summed fragment intensity (spectra-only tables)
    pub const MS2_SUM: &str = "MS2_sum";
    /// Summed fragment intensity (identification tables)
    pub const SUMMED_MS2_INTENSITY: &str = "summed_ms2_intensity";
    /// Identification flag
    pub const PASS_THRESHOLD: &str = "pass_threshold";
    /// Best passing peptide
    pub const PEPTIDE: &str = "peptide";
}

/// How per-target results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetReport {
    /// `yes` / `no`
    #[default]
    Flag,
    /// Summed intensity of matching peaks
    Intensity,
}

/// Which columns a table carries
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Header of the summed fragment intensity column
    pub ms2_column: &'static str,
    /// Target column labels, in order
    pub target_labels: Vec<String>,
    /// Target cell format
    pub target_report: TargetReport,
    /// Whether `pass_threshold` and `peptide` are written
    pub identifications: bool,
}

impl TableLayout {
    /// Layout for spectra-only tables
    pub fn spectra(target_labels: Vec<String>, target_report: TargetReport) -> Self {
        Self {
            ms2_column: columns::MS2_SUM,
            target_labels,
            target_report,
            identifications: false,
        }
    }

    /// Layout for tables with identifications joined
    pub fn identifications(target_labels: Vec<String>, target_report: TargetReport) -> Self {
        Self {
            ms2_column: columns::SUMMED_MS2_INTENSITY,
            target_labels,
            target_report,
            identifications: true,
        }
    }

    /// Full header row
    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = [
            columns::SCAN_NUMBER,
            columns::RETENTION_TIME,
            columns::PEPMASS,
            columns::INTENSITY,
            self.ms2_column,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        header.extend(self.target_labels.iter().cloned());
        if self.identifications {
            header.push(columns::PASS_THRESHOLD.to_string());
            header.push(columns::PEPTIDE.to_string());
        }
        header
    }
}

/// Format a float the way the tables store them (`0.0`, `1534000.0`, `512.7731`)
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Parse a `yes`/`no` style cell
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "y" => Some(true),
        "no" | "false" | "0" | "n" | "" => Some(false),
        _ => None,
    }
}

/// Format a boolean as `yes`/`no`
pub fn format_flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Open a table writer on a file path (`-` for stdout)
pub fn create_table_file<P: AsRef<Path>>(
    path: P,
    layout: TableLayout,
) -> Result<ScanTableWriter<Box<dyn std::io::Write>>, TableError> {
    ScanTableWriter::new(crate::io::create_output(path)?, layout)
}
