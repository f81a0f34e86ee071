//! Left join of identifications and target matches onto MGF scans.
//!
//! Every scan produces exactly one [`ScanRow`], in file order. Identifications
//! for scans that are not in the MGF file are counted but never emitted.

use std::collections::HashSet;

use log::{debug, warn};

use crate::mgf::MgfScan;
use crate::mzid::IdentificationMap;
use crate::targets::{Target, TargetMatch};

/// Identification columns of an output row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIdentification {
    /// Scan passed the search engine threshold
    pub passed: bool,
    /// Best passing peptide sequence
    pub peptide: Option<String>,
}

/// One output row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanRow {
    /// Native scan number
    pub scan_number: u64,
    /// Retention time in seconds
    pub retention_time: Option<f64>,
    /// Precursor m/z
    pub precursor_mz: f64,
    /// Precursor intensity as written in the MGF
    pub precursor_intensity: f64,
    /// Sum of all fragment intensities
    pub summed_ms2_intensity: f64,
    /// One entry per target, in target order
    pub targets: Vec<TargetMatch>,
    /// Present only when identifications were supplied
    pub identification: Option<RowIdentification>,
}

impl ScanRow {
    /// True if an identification was joined and it passed
    pub fn is_identified(&self) -> bool {
        self.identification
            .as_ref()
            .map(|id| id.passed)
            .unwrap_or(false)
    }
}

/// Rows plus bookkeeping from the join
#[derive(Debug, Clone, Default)]
pub struct JoinOutput {
    /// One row per scan
    pub rows: Vec<ScanRow>,
    /// Identified scan numbers with no matching MGF scan
    pub orphaned_identifications: usize,
}

/// Build one row for a scan
pub fn build_row(
    scan: &MgfScan,
    identifications: Option<&IdentificationMap>,
    targets: &[Target],
) -> ScanRow {
    let identification = identifications.map(|ids| match ids.get(scan.scan_number) {
        Some(id) => RowIdentification {
            passed: id.passed,
            peptide: if id.passed { id.peptide.clone() } else { None },
        },
        None => RowIdentification::default(),
    });

    ScanRow {
        scan_number: scan.scan_number,
        retention_time: scan.retention_time,
        precursor_mz: scan.precursor_mz,
        precursor_intensity: scan.precursor_intensity,
        summed_ms2_intensity: scan.summed_intensity(),
        targets: targets.iter().map(|t| t.match_peaks(&scan.peaks)).collect(),
        identification,
    }
}

/// Join identifications and target matches onto every scan
pub fn build_rows(
    scans: &[MgfScan],
    identifications: Option<&IdentificationMap>,
    targets: &[Target],
) -> JoinOutput {
    let rows: Vec<ScanRow> = scans
        .iter()
        .map(|scan| build_row(scan, identifications, targets))
        .collect();

    let orphaned_identifications = identifications
        .map(|ids| {
            let present: HashSet<u64> = scans.iter().map(|s| s.scan_number).collect();
            ids.scan_numbers()
                .filter(|scan| ids.is_identified(*scan) && !present.contains(scan))
                .count()
        })
        .unwrap_or(0);

    if orphaned_identifications > 0 {
        warn!(
            "{} identified scans have no spectrum in the MGF file and were not written",
            orphaned_identifications
        );
    }
    debug!("Joined {} scan rows", rows.len());

    JoinOutput {
        rows,
        orphaned_identifications,
    }
}
