use std::fmt;

use serde::{Deserialize, Serialize};

/// A single fragment peak
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Peak {
    /// Fragment m/z
    pub mz: f64,
    /// Fragment intensity
    pub intensity: f64,
}

impl Peak {
    /// Create a new peak
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }
}

/// One MS/MS scan read from a `BEGIN IONS` ... `END IONS` block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MgfScan {
    /// Native scan number, unique within a file
    pub scan_number: u64,

    /// Raw `TITLE` value
    pub title: String,

    /// Retention time in seconds (`RTINSECONDS`)
    pub retention_time: Option<f64>,

    /// Precursor m/z (first `PEPMASS` value)
    pub precursor_mz: f64,

    /// Precursor intensity (second `PEPMASS` value, `0.0` when absent).
    ///
    /// This is whatever the converter wrote, usually the apex intensity in the
    /// survey scan, not an XIC area.
    pub precursor_intensity: f64,

    /// Precursor charge (`CHARGE`, or third `PEPMASS` value)
    pub charge: Option<i32>,

    /// Fragment peaks in file order
    pub peaks: Vec<Peak>,
}

impl MgfScan {
    /// Sum of all fragment intensities
    pub fn summed_intensity(&self) -> f64 {
        self.peaks.iter().map(|p| p.intensity).sum()
    }

    /// Number of fragment peaks
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }
}

/// Why an ion block was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Neither `TITLE` nor `SCANS` yielded a scan number
    MissingScanNumber,
    /// No `PEPMASS` line
    MissingPrecursor,
    /// `PEPMASS` could not be parsed
    InvalidPrecursor(String),
    /// `BEGIN IONS` seen before the previous block was closed
    Interrupted,
    /// End of file inside a block
    Unterminated,
    /// Scan number already seen earlier in the file
    DuplicateScan(u64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingScanNumber => write!(f, "no scan number in TITLE or SCANS"),
            SkipReason::MissingPrecursor => write!(f, "no PEPMASS"),
            SkipReason::InvalidPrecursor(value) => write!(f, "invalid PEPMASS '{}'", value),
            SkipReason::Interrupted => write!(f, "BEGIN IONS without preceding END IONS"),
            SkipReason::Unterminated => write!(f, "missing END IONS at end of file"),
            SkipReason::DuplicateScan(scan) => write!(f, "duplicate scan number {}", scan),
        }
    }
}

/// Counters collected while reading an MGF file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MgfParseStats {
    /// Ion blocks encountered
    pub blocks: usize,
    /// Scans returned to the caller
    pub scans: usize,
    /// Ion blocks dropped
    pub skipped_blocks: usize,
    /// Lines inside blocks that were neither headers nor peaks
    pub skipped_lines: usize,
    /// Total fragment peaks in accepted scans
    pub peaks: usize,
}

impl fmt::Display for MgfParseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read {} scans ({} peaks) from {} ion blocks, skipped {} blocks and {} lines",
            self.scans, self.peaks, self.blocks, self.skipped_blocks, self.skipped_lines
        )
    }
}
