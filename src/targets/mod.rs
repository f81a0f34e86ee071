//! Fragment ion targets and tolerance matching.
//!
//! Targets are read from a CSV file:
//!
//! ```text
//! m/z,tolerance,tolerance_type
//! 126.1277,10,ppm
//! 204.0867,0.01,Da
//! ```
//!
//! `tolerance_type` is optional and defaults to the caller's unit (Da unless
//! configured otherwise).

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::mgf::Peak;

pub use error::TargetError;

mod error;


/// Unit of a mass tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceUnit {
    /// Absolute tolerance in Dalton (Th for m/z values)
    #[default]
    Da,
    /// Relative tolerance in parts per million
    Ppm,
}

impl FromStr for ToleranceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "da" | "th" | "dalton" => Ok(ToleranceUnit::Da),
            "ppm" => Ok(ToleranceUnit::Ppm),
            other => Err(format!("unknown tolerance unit '{}'", other)),
        }
    }
}

impl fmt::Display for ToleranceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToleranceUnit::Da => write!(f, "Da"),
            ToleranceUnit::Ppm => write!(f, "ppm"),
        }
    }
}

/// A mass tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Absolute window in Da
    Da(f64),
    /// Relative window in ppm of the target m/z
    Ppm(f64),
}

impl Tolerance {
    /// Build a tolerance from a value and unit
    pub fn new(value: f64, unit: ToleranceUnit) -> Self {
        match unit {
            ToleranceUnit::Da => Tolerance::Da(value),
            ToleranceUnit::Ppm => Tolerance::Ppm(value),
        }
    }

    /// Absolute half-window around `mz` in Da
    pub fn window_da(&self, mz: f64) -> f64 {
        match *self {
            Tolerance::Da(da) => da,
            Tolerance::Ppm(ppm) => ppm / 1e6 * mz,
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tolerance::Da(v) => write!(f, "{} Da", v),
            Tolerance::Ppm(v) => write!(f, "{} ppm", v),
        }
    }
}

/// A fragment ion to look for in every scan
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Target m/z
    pub mz: f64,
    /// Matching tolerance
    pub tolerance: Tolerance,
}

/// Result of matching one target against one scan
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetMatch {
    /// Some peak fell inside the window
    pub hit: bool,
    /// Summed intensity of all peaks inside the window
    pub intensity: f64,
}

impl Target {
    /// Create a new target
    pub fn new(mz: f64, tolerance: Tolerance) -> Self {
        Self { mz, tolerance }
    }

    /// Column label used in output tables, e.g. `500.0` or `123.456`
    pub fn label(&self) -> String {
        format_mz_label(self.mz)
    }

    /// True if `mz` lies within tolerance of the target
    pub fn contains(&self, mz: f64) -> bool {
        (mz - self.mz).abs() <= self.tolerance.window_da(self.mz)
    }

    /// Match this target against a list of peaks
    pub fn match_peaks(&self, peaks: &[Peak]) -> TargetMatch {
        peaks
            .iter()
            .filter(|peak| self.contains(peak.mz))
            .fold(TargetMatch::default(), |acc, peak| TargetMatch {
                hit: true,
                intensity: acc.intensity + peak.intensity,
            })
    }
}

/// Format an m/z so it always carries a fractional part (`500.0`, `123.456`)
pub fn format_mz_label(mz: f64) -> String {
    format!("{:?}", mz)
}

/// Column names accepted in target files
pub mod columns {
    /// Target m/z
    pub const MZ: &str = "m/z";
    /// Tolerance value
    pub const TOLERANCE: &str = "tolerance";
    /// Tolerance unit (`ppm` or `Da`)
    pub const TOLERANCE_TYPE: &str = "tolerance_type";
}

/// Parse targets from a CSV reader
pub fn read_targets<R: Read>(
    reader: R,
    default_unit: ToleranceUnit,
) -> Result<Vec<Target>, TargetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect();

    let find = |name: &str| headers.iter().position(|h| h == name);
    let mz_index =
        find(columns::MZ).ok_or_else(|| TargetError::MissingColumn(columns::MZ.to_string()))?;
    let tolerance_index = find(columns::TOLERANCE)
        .ok_or_else(|| TargetError::MissingColumn(columns::TOLERANCE.to_string()))?;
    let unit_index = find(columns::TOLERANCE_TYPE);

    let mut targets = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let mz = parse_number(&record, mz_index, columns::MZ, row)?;
        let tolerance = parse_number(&record, tolerance_index, columns::TOLERANCE, row)?;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(TargetError::InvalidTolerance {
                value: tolerance,
                row,
            });
        }

        let unit = match unit_index.and_then(|idx| record.get(idx)) {
            Some(value) if !value.is_empty() => value.parse().unwrap_or_else(|e| {
                warn!("{} on row {}, assuming Da", e, row);
                ToleranceUnit::Da
            }),
            _ => default_unit,
        };

        targets.push(Target::new(mz, Tolerance::new(tolerance, unit)));
    }

    Ok(targets)
}

/// Load targets from a CSV file
pub fn read_targets_file<P: AsRef<Path>>(
    path: P,
    default_unit: ToleranceUnit,
) -> Result<Vec<Target>, TargetError> {
    let path = path.as_ref();
    let targets = read_targets(crate::io::open_input(path)?, default_unit)?;
    info!(
        "Successfully parsed {} mass targets from {}",
        targets.len(),
        path.display()
    );
    Ok(targets)
}

fn parse_number(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<f64, TargetError> {
    let value = record.get(index).unwrap_or_default();
    value.parse().map_err(|_| TargetError::InvalidNumber {
        column: column.to_string(),
        value: value.to_string(),
        row,
    })
}
