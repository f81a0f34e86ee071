use std::collections::hash_map::{Entry, HashMap};
use std::fmt;

use serde::Serialize;

/// Identification status of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identification {
    /// At least one PSM for this scan passed the search engine threshold
    pub passed: bool,
    /// Sequence of the best-ranked passing PSM
    pub peptide: Option<String>,
    /// Rank of the best-ranked passing PSM
    pub rank: Option<u32>,
}

impl Identification {
    /// Fold another result for the same scan into this one
    pub fn merge(&mut self, other: Identification) {
        if other.passed && (!self.passed || rank_key(other.rank) < rank_key(self.rank)) {
            self.peptide = other.peptide;
            self.rank = other.rank;
        }
        self.passed |= other.passed;
    }
}

fn rank_key(rank: Option<u32>) -> u32 {
    rank.unwrap_or(u32::MAX)
}

/// A `SpectrumIdentificationItem` reduced to what the join needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentificationItem {
    /// `passThreshold` attribute
    pub pass_threshold: bool,
    /// `rank` attribute
    pub rank: Option<u32>,
    /// `peptide_ref` attribute
    pub peptide_ref: Option<String>,
}

/// A `SpectrumIdentificationResult` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpectrumResult {
    /// `spectrumID` attribute
    pub spectrum_id: String,
    /// Scan number resolved from the title, scan cvParam or spectrumID
    pub scan_number: Option<u64>,
    /// Child identification items
    pub items: Vec<IdentificationItem>,
}

impl SpectrumResult {
    /// True if any item passed the threshold
    pub fn passed(&self) -> bool {
        self.items.iter().any(|item| item.pass_threshold)
    }

    /// The passing item with the lowest rank
    pub fn best_passing_item(&self) -> Option<&IdentificationItem> {
        self.items
            .iter()
            .filter(|item| item.pass_threshold)
            .min_by_key(|item| rank_key(item.rank))
    }
}

/// Scan number to identification status.
///
/// Scans not present in the map are unidentified.
#[derive(Debug, Clone, Default)]
pub struct IdentificationMap {
    entries: HashMap<u64, Identification>,
}

impl IdentificationMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scan, merging with any earlier entry for the same scan
    pub fn insert(&mut self, scan_number: u64, identification: Identification) {
        match self.entries.entry(scan_number) {
            Entry::Occupied(mut existing) => existing.get_mut().merge(identification),
            Entry::Vacant(slot) => {
                slot.insert(identification);
            }
        }
    }

    /// Look up a scan
    pub fn get(&self, scan_number: u64) -> Option<&Identification> {
        self.entries.get(&scan_number)
    }

    /// True if the scan is present and passed the threshold
    pub fn is_identified(&self, scan_number: u64) -> bool {
        self.get(scan_number).map(|id| id.passed).unwrap_or(false)
    }

    /// Number of scans in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no scans were recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of scans that passed the threshold
    pub fn passed_count(&self) -> usize {
        self.entries.values().filter(|id| id.passed).count()
    }

    /// Iterate over all scan numbers in the map
    pub fn scan_numbers(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }
}

/// Counters collected while reading an mzIdentML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MzIdParseStats {
    /// `SpectrumIdentificationResult` elements read
    pub results: usize,
    /// Results whose scan number could not be determined
    pub results_without_scan: usize,
    /// `SpectrumIdentificationItem` elements read
    pub items: usize,
    /// Peptide sequences collected
    pub peptides: usize,
}

impl fmt::Display for MzIdParseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read {} spectrum results ({} without scan number) with {} PSMs and {} peptides",
            self.results, self.results_without_scan, self.items, self.peptides
        )
    }
}
