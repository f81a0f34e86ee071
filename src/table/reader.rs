use std::io::Read;
use std::path::Path;

use log::{info, warn};

use super::{columns, parse_flag, TableError};
use crate::join::ScanRow;

/// The parts of a scan table row needed for summaries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRecord {
    /// Native scan number, if the column is present
    pub scan_number: Option<u64>,
    /// Precursor intensity
    pub precursor_intensity: f64,
    /// Summed fragment intensity
    pub summed_ms2_intensity: f64,
    /// Scan passed the identification threshold
    pub identified: bool,
    /// One entry per target column
    pub target_hits: Vec<bool>,
}

impl From<&ScanRow> for TableRecord {
    fn from(row: &ScanRow) -> Self {
        Self {
            scan_number: Some(row.scan_number),
            precursor_intensity: row.precursor_intensity,
            summed_ms2_intensity: row.summed_ms2_intensity,
            identified: row.is_identified(),
            target_hits: row.targets.iter().map(|t| t.hit).collect(),
        }
    }
}

/// A scan table loaded for summarising
#[derive(Debug, Clone, Default)]
pub struct TableContents {
    /// Target column labels, in header order
    pub target_labels: Vec<String>,
    /// Parsed rows
    pub records: Vec<TableRecord>,
    /// Rows dropped because a cell could not be parsed
    pub skipped_rows: usize,
}

/// Column indices resolved from a header row
struct HeaderIndex {
    width: usize,
    scan_number: Option<usize>,
    intensity: usize,
    ms2: usize,
    pass_threshold: usize,
    targets: Vec<(String, usize)>,
}

impl HeaderIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, TableError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let find = |name: &str| names.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |name: &str| find(name).ok_or_else(|| TableError::MissingColumn(name.to_string()));

        let ms2 = find(columns::SUMMED_MS2_INTENSITY)
            .or_else(|| find(columns::MS2_SUM))
            .ok_or_else(|| {
                TableError::MissingColumn(format!(
                    "{} or {}",
                    columns::SUMMED_MS2_INTENSITY,
                    columns::MS2_SUM
                ))
            })?;

        // Any header that is a number is a target column
        let targets = names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.parse::<f64>().is_ok())
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Self {
            width: names.len(),
            scan_number: find(columns::SCAN_NUMBER),
            intensity: require(columns::INTENSITY)?,
            ms2,
            pass_threshold: require(columns::PASS_THRESHOLD)?,
            targets,
        })
    }

    fn parse(&self, record: &csv::StringRecord) -> Result<TableRecord, String> {
        if record.len() < self.width {
            return Err(format!(
                "expected {} cells, found {}",
                self.width,
                record.len()
            ));
        }

        let cell = |index: usize| record.get(index).unwrap_or_default().trim();
        let number = |index: usize| -> Result<f64, String> {
            let value = cell(index);
            match value.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(format!("invalid number '{}'", value)),
            }
        };

        let pass_threshold = cell(self.pass_threshold);
        let identified = match parse_flag(pass_threshold) {
            Some(flag) if !pass_threshold.is_empty() => flag,
            _ => return Err(format!("invalid pass_threshold '{}'", pass_threshold)),
        };

        let target_hits = self
            .targets
            .iter()
            .map(|(label, index)| {
                let value = cell(*index);
                // Intensity cells: any number is a hit, empty is a miss
                parse_flag(value)
                    .or_else(|| value.parse::<f64>().ok().map(|_| true))
                    .ok_or_else(|| format!("invalid value '{}' for target {}", value, label))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TableRecord {
            scan_number: self.scan_number.and_then(|i| cell(i).parse().ok()),
            precursor_intensity: number(self.intensity)?,
            summed_ms2_intensity: number(self.ms2)?,
            identified,
            target_hits,
        })
    }
}

/// Read a scan table produced by the `mgf-mzid` pipeline.
///
/// `intensity`, `pass_threshold` and one of `summed_ms2_intensity` / `MS2_sum`
/// are required.
pub fn read_scan_table<R: Read>(reader: R) -> Result<TableContents, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let index = HeaderIndex::resolve(csv_reader.headers()?)?;
    let mut contents = TableContents {
        target_labels: index.targets.iter().map(|(label, _)| label.clone()).collect(),
        ..Default::default()
    };

    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        match index.parse(&record) {
            Ok(parsed) => contents.records.push(parsed),
            Err(reason) => {
                warn!("Skipping table row {}: {}", i + 1, reason);
                contents.skipped_rows += 1;
            }
        }
    }

    Ok(contents)
}

/// Read a scan table from a file
pub fn read_scan_table_file<P: AsRef<Path>>(path: P) -> Result<TableContents, TableError> {
    let path = path.as_ref();
    let contents = read_scan_table(crate::io::open_input(path)?)?;
    info!(
        "Read {} rows from {} ({} skipped)",
        contents.records.len(),
        path.display(),
        contents.skipped_rows
    );
    Ok(contents)
}
