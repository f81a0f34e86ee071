//! Peptide list overlaps
//!
//! Each input is a list of peptide sequences, one per line (only the first
//! whitespace separated column is used, so exported reports with extra
//! columns work too). Lists are compared as sets: the report gives the size
//! of every list and the number of peptides shared by every combination of
//! two or more lists, largest overlap first.

use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

pub use error::OverlapError;

mod error;


/// Largest number of lists compared in one report
pub const MAX_LISTS: usize = 16;

/// A named set of peptide sequences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeptideList {
    /// Display name (the file name for lists read from disk)
    pub name: String,
    /// Unique sequences
    pub peptides: HashSet<String>,
}

impl PeptideList {
    /// Create a list from sequences
    pub fn new<I, S>(name: impl Into<String>, peptides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            peptides: peptides.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of unique sequences
    pub fn len(&self) -> usize {
        self.peptides.len()
    }

    /// True if the list has no sequences
    pub fn is_empty(&self) -> bool {
        self.peptides.is_empty()
    }
}

/// Read unique sequences, optionally skipping a header line
pub fn read_peptides<R: BufRead>(
    reader: R,
    skip_header: bool,
) -> Result<HashSet<String>, OverlapError> {
    let mut peptides = HashSet::new();
    for line in reader.lines().skip(usize::from(skip_header)) {
        let line = line?;
        if let Some(sequence) = line.split_whitespace().next() {
            peptides.insert(sequence.to_string());
        }
    }
    Ok(peptides)
}

/// Read a peptide list file; the list is named after the file
pub fn read_peptide_list_file<P: AsRef<Path>>(
    path: P,
    skip_header: bool,
) -> Result<PeptideList, OverlapError> {
    let path = path.as_ref();
    let peptides = read_peptides(crate::io::open_input(path)?, skip_header)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!("Read {} peptides from {}", peptides.len(), path.display());
    Ok(PeptideList { name, peptides })
}

/// Peptides shared by one combination of lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlap {
    /// List names in input order
    pub lists: Vec<String>,
    /// Sequences present in all of them
    pub common: usize,
}

/// List sizes and overlaps of every combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapReport {
    /// `(name, unique peptides)` per list, in input order
    pub sizes: Vec<(String, usize)>,
    /// Overlaps sorted by `common`, largest first; ties keep combination order
    pub overlaps: Vec<Overlap>,
}

impl OverlapReport {
    /// Compare all combinations of two or more lists
    pub fn from_lists(lists: &[PeptideList]) -> Result<Self, OverlapError> {
        if lists.len() < 2 {
            return Err(OverlapError::TooFewLists(lists.len()));
        }
        if lists.len() > MAX_LISTS {
            return Err(OverlapError::TooManyLists {
                count: lists.len(),
                max: MAX_LISTS,
            });
        }

        let mut overlaps = Vec::new();
        for size in 2..=lists.len() {
            for combination in combinations(lists.len(), size) {
                let members: Vec<&PeptideList> = combination.iter().map(|&i| &lists[i]).collect();
                overlaps.push(Overlap {
                    lists: members.iter().map(|l| l.name.clone()).collect(),
                    common: common_count(&members),
                });
            }
        }
        overlaps.sort_by(|a, b| b.common.cmp(&a.common));

        Ok(Self {
            sizes: lists.iter().map(|l| (l.name.clone(), l.len())).collect(),
            overlaps,
        })
    }

    /// Keep only the `n` largest overlaps
    pub fn truncate(&mut self, n: usize) {
        self.overlaps.truncate(n);
    }

    /// Serialize the report to pretty JSON
    pub fn to_json(&self) -> Result<String, OverlapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for OverlapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of peptides per file:")?;
        for (name, size) in &self.sizes {
            writeln!(f, "{}: {}", name, size)?;
        }

        writeln!(f)?;
        writeln!(f, "Highest overlap combinations:")?;
        for (i, overlap) in self.overlaps.iter().enumerate() {
            writeln!(
                f,
                "{}. {}: {} common peptides",
                i + 1,
                overlap.lists.join(" + "),
                overlap.common
            )?;
        }
        Ok(())
    }
}

/// Size of the intersection, walking the smallest set
fn common_count(lists: &[&PeptideList]) -> usize {
    let Some(smallest) = lists.iter().min_by_key(|l| l.len()) else {
        return 0;
    };
    smallest
        .peptides
        .iter()
        .filter(|p| lists.iter().all(|l| l.peptides.contains(*p)))
        .count()
}

/// Index combinations of `k` out of `n`, in lexicographic order
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    if k == 0 || k > n {
        return result;
    }
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.clone());

        // Rightmost index that can still move
        let Some(i) = (0..k).rev().find(|&i| indices[i] != i + n - k) else {
            return result;
        };
        indices[i] += 1;
        for j in i + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

/// Read every file and build the report
pub fn compare_peptide_files<P: AsRef<Path>>(
    paths: &[P],
    skip_header: bool,
) -> Result<OverlapReport, OverlapError> {
    let lists = paths
        .iter()
        .map(|p| read_peptide_list_file(p, skip_header))
        .collect::<Result<Vec<_>, _>>()?;
    let report = OverlapReport::from_lists(&lists)?;
    info!(
        "Compared {} peptide lists ({} combinations)",
        lists.len(),
        report.overlaps.len()
    );
    Ok(report)
}
