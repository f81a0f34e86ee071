//! MGF (+ mzIdentML) to scan table pipeline
//!
//! Parses the inputs, joins identifications and target matches onto every
//! scan, and writes one CSV row per scan.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;

use crate::join::{build_rows, JoinOutput};
use crate::mgf::{read_mgf_file, MgfError, MgfParseStats, MgfScan};
use crate::mzid::IdentificationMap;
#[cfg(feature = "mzid")]
use crate::mzid::{read_mzid_file, MzIdError};
use crate::table::{create_table_file, TableError, TableLayout, TargetReport};
use crate::targets::{read_targets_file, Target, TargetError, ToleranceUnit};

/// Errors that can occur during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Error parsing the MGF file
    #[error("MGF parsing error: {0}")]
    MgfError(#[from] MgfError),

    /// Error parsing the mzIdentML file
    #[cfg(feature = "mzid")]
    #[error("mzIdentML parsing error: {0}")]
    MzIdError(#[from] MzIdError),

    /// Error loading the target list
    #[error("Target list error: {0}")]
    TargetError(#[from] TargetError),

    /// Error writing the output table
    #[error("Table writer error: {0}")]
    TableError(#[from] TableError),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Configuration for the scan table conversion
#[derive(Debug, Clone, Default)]
pub struct ConversionConfig {
    /// Optional CSV list of fragment ion targets
    pub targets_path: Option<PathBuf>,

    /// How target columns are filled
    pub target_report: TargetReport,

    /// Unit for target rows without a `tolerance_type`
    pub default_tolerance_unit: ToleranceUnit,
}

/// Statistics from a conversion
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Data rows written to the table
    pub scans_written: usize,
    /// Rows whose scan passed the identification threshold
    pub identified_scans: usize,
    /// Identified scans with no spectrum in the MGF file
    pub orphaned_identifications: usize,
    /// MGF blocks dropped as malformed or duplicate
    pub skipped_blocks: usize,
    /// Scans hitting each target, in target order
    pub target_hits: Vec<(String, usize)>,
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scans written, {} identified, {} orphaned identifications, {} MGF blocks skipped",
            self.scans_written,
            self.identified_scans,
            self.orphaned_identifications,
            self.skipped_blocks
        )
    }
}

/// Converter from MGF (+ mzIdentML) to a scan table
pub struct ScanTableConverter {
    config: ConversionConfig,
}

impl ScanTableConverter {
    /// Create a new converter with default configuration
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// Create a new converter with custom configuration
    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Set the target list
    pub fn with_targets<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.targets_path = Some(path.into());
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Write a spectra-only table (`scan_number,RT,pepmass,intensity,MS2_sum,...`)
    pub fn convert_spectra<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        mgf: P,
        output: Q,
    ) -> Result<ConversionStats, ConversionError> {
        let targets = self.load_targets()?;
        let (scans, mgf_stats) = read_mgf_file(mgf)?;
        self.join_and_write(&scans, &mgf_stats, None, &targets, output.as_ref())
    }

    /// Write a table with identifications joined onto every scan
    #[cfg(feature = "mzid")]
    pub fn convert_with_identifications<P, Q, O>(
        &self,
        mgf: P,
        mzid: Q,
        output: O,
    ) -> Result<ConversionStats, ConversionError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        O: AsRef<Path>,
    {
        let targets = self.load_targets()?;
        let (scans, mgf_stats) = read_mgf_file(mgf)?;
        let (identifications, _) = read_mzid_file(mzid)?;
        self.join_and_write(
            &scans,
            &mgf_stats,
            Some(&identifications),
            &targets,
            output.as_ref(),
        )
    }

    fn load_targets(&self) -> Result<Vec<Target>, ConversionError> {
        match &self.config.targets_path {
            Some(path) => Ok(read_targets_file(path, self.config.default_tolerance_unit)?),
            None => Ok(Vec::new()),
        }
    }

    fn join_and_write(
        &self,
        scans: &[MgfScan],
        mgf_stats: &MgfParseStats,
        identifications: Option<&IdentificationMap>,
        targets: &[Target],
        output: &Path,
    ) -> Result<ConversionStats, ConversionError> {
        let JoinOutput {
            rows,
            orphaned_identifications,
        } = build_rows(scans, identifications, targets);

        let labels: Vec<String> = targets.iter().map(Target::label).collect();
        let layout = match identifications {
            Some(_) => TableLayout::identifications(labels.clone(), self.config.target_report),
            None => TableLayout::spectra(labels.clone(), self.config.target_report),
        };

        if rows.is_empty() {
            warn!("No scans to write; {} will only contain a header", output.display());
        }

        let mut writer = create_table_file(output, layout)?;
        writer.write_rows(&rows)?;
        let scans_written = writer.finish()?;

        let target_hits = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let hits = rows.iter().filter(|row| row.targets[i].hit).count();
                (label, hits)
            })
            .collect();

        let stats = ConversionStats {
            scans_written,
            identified_scans: rows.iter().filter(|row| row.is_identified()).count(),
            orphaned_identifications,
            skipped_blocks: mgf_stats.skipped_blocks,
            target_hits,
        };
        info!("Wrote {}: {}", output.display(), stats);
        Ok(stats)
    }
}

impl Default for ScanTableConverter {
    fn default() -> Self {
        Self::new()
    }
}
