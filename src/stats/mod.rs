//! Identification rate summaries
//!
//! For a set of scans the summariser reports the share of identified scans
//! three ways:
//!
//! - unweighted: identified scans / all scans
//! - precursor weighted: Σ precursor intensity (identified) / Σ precursor intensity (all)
//! - MS2 weighted: Σ summed MS2 intensity (identified) / Σ summed MS2 intensity (all)
//!
//! A rate is `None` when its denominator is zero.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::join::ScanRow;
use crate::table::{read_scan_table_file, TableContents, TableRecord};

pub use error::StatsError;

mod error;
mod report;


/// Totals and rates for one set of scans
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IdentificationSummary {
    /// Scans considered
    pub total_scans: usize,
    /// Scans that passed the identification threshold
    pub identified_scans: usize,
    /// Σ precursor intensity over all scans
    pub total_precursor_intensity: f64,
    /// Σ precursor intensity over identified scans
    pub identified_precursor_intensity: f64,
    /// Σ summed MS2 intensity over all scans
    pub total_ms2_intensity: f64,
    /// Σ summed MS2 intensity over identified scans
    pub identified_ms2_intensity: f64,
    /// identified / total scans
    pub unweighted_rate: Option<f64>,
    /// Precursor-intensity weighted rate
    pub precursor_weighted_rate: Option<f64>,
    /// MS2-intensity weighted rate
    pub ms2_weighted_rate: Option<f64>,
}

impl IdentificationSummary {
    /// Summarise a sequence of records
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a TableRecord>,
    {
        let mut summary = Self::default();
        for record in records {
            summary.total_scans += 1;
            summary.total_precursor_intensity += record.precursor_intensity;
            summary.total_ms2_intensity += record.summed_ms2_intensity;
            if record.identified {
                summary.identified_scans += 1;
                summary.identified_precursor_intensity += record.precursor_intensity;
                summary.identified_ms2_intensity += record.summed_ms2_intensity;
            }
        }

        summary.unweighted_rate = ratio(summary.identified_scans as f64, summary.total_scans as f64);
        summary.precursor_weighted_rate = ratio(
            summary.identified_precursor_intensity,
            summary.total_precursor_intensity,
        );
        summary.ms2_weighted_rate =
            ratio(summary.identified_ms2_intensity, summary.total_ms2_intensity);
        summary
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Summary restricted to scans where one target ion was found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSummary {
    /// Target column label (m/z)
    pub label: String,
    /// Summary over scans containing the target
    pub summary: IdentificationSummary,
}

/// Complete summary of a scan table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentificationReport {
    /// Path of the summarised table
    pub source: Option<String>,
    /// Summary over all scans
    pub overall: IdentificationSummary,
    /// Per-target summaries, in column order
    pub targets: Vec<TargetSummary>,
    /// Table rows that could not be parsed
    pub skipped_rows: usize,
}

impl IdentificationReport {
    /// Summarise records with the given target labels
    pub fn from_records(records: &[TableRecord], target_labels: &[String]) -> Self {
        let targets = target_labels
            .iter()
            .enumerate()
            .map(|(i, label)| TargetSummary {
                label: label.clone(),
                summary: IdentificationSummary::from_records(
                    records
                        .iter()
                        .filter(|r| r.target_hits.get(i).copied().unwrap_or(false)),
                ),
            })
            .collect();

        Self {
            source: None,
            overall: IdentificationSummary::from_records(records),
            targets,
            skipped_rows: 0,
        }
    }

    /// Summarise a table read from disk
    pub fn from_table(contents: &TableContents) -> Self {
        let mut report = Self::from_records(&contents.records, &contents.target_labels);
        report.skipped_rows = contents.skipped_rows;
        report
    }

    /// Summarise joined rows still in memory
    pub fn from_rows(rows: &[ScanRow], target_labels: &[String]) -> Self {
        let records: Vec<TableRecord> = rows.iter().map(TableRecord::from).collect();
        Self::from_records(&records, target_labels)
    }

    /// Attach the source path shown in the report header
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, StatsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Read a scan table and summarise it
pub fn summarize_table_file<P: AsRef<Path>>(path: P) -> Result<IdentificationReport, StatsError> {
    let path = path.as_ref();
    let contents = read_scan_table_file(path)?;
    Ok(IdentificationReport::from_table(&contents).with_source(path.display().to_string()))
}

/// Format a rate as a percentage, or `n/a`
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for IdentificationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} scans identified ({} by count, {} precursor weighted, {} MS2 weighted)",
            self.identified_scans,
            self.total_scans,
            format_rate(self.unweighted_rate),
            format_rate(self.precursor_weighted_rate),
            format_rate(self.ms2_weighted_rate)
        )
    }
}
