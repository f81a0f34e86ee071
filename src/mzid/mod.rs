//! Streaming mzIdentML parser using quick-xml
//!
//! Only the parts of the document needed to decide, per scan, whether a
//! peptide-spectrum match passed the search engine threshold are read:
//!
//! ```text
//! MzIdentML
//! ├── SequenceCollection
//! │   └── Peptide* (id, PeptideSequence)
//! └── DataCollection
//!     └── AnalysisData
//!         └── SpectrumIdentificationList
//!             └── SpectrumIdentificationResult* (spectrumID)
//!                 ├── SpectrumIdentificationItem* (passThreshold, rank, peptide_ref)
//!                 └── cvParam "spectrum title" / "scan number(s)"
//! ```
//!
//! Element names are matched without namespace prefixes, so both 1.1 and 1.2
//! documents are accepted.

#[cfg(feature = "mzid")]
use std::collections::HashMap;
#[cfg(feature = "mzid")]
use std::io::BufRead;
#[cfg(feature = "mzid")]
use std::path::Path;

#[cfg(feature = "mzid")]
use log::{debug, info};
#[cfg(feature = "mzid")]
use quick_xml::Reader;

#[cfg(feature = "mzid")]
pub use error::MzIdError;
pub use models::{
    Identification, IdentificationItem, IdentificationMap, MzIdParseStats, SpectrumResult,
};

#[cfg(feature = "mzid")]
mod error;
#[cfg(feature = "mzid")]
mod helpers;
mod models;
#[cfg(feature = "mzid")]
mod reader;

#[cfg(all(test, feature = "mzid"))]
mod tests;

/// Streaming parser for mzIdentML files
#[cfg(feature = "mzid")]
pub struct MzIdentMlReader<R: BufRead> {
    reader: Reader<R>,
    peptides: HashMap<String, String>,
    stats: MzIdParseStats,
}

#[cfg(feature = "mzid")]
impl<R: BufRead> MzIdentMlReader<R> {
    /// Create a new parser from a BufRead source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            peptides: HashMap::new(),
            stats: MzIdParseStats::default(),
        }
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &MzIdParseStats {
        &self.stats
    }

    /// Peptide sequence for a `peptide_ref`, if its `Peptide` element has been read
    pub fn peptide_sequence(&self, peptide_ref: &str) -> Option<&str> {
        self.peptides.get(peptide_ref).map(String::as_str)
    }

    /// Consume the whole document and build the scan to identification map
    pub fn read_identifications(mut self) -> Result<(IdentificationMap, MzIdParseStats), MzIdError> {
        let mut pending = Vec::new();
        while let Some(result) = self.next_result()? {
            let Some(scan_number) = result.scan_number else {
                debug!(
                    "No scan number for spectrum result '{}', skipping",
                    result.spectrum_id
                );
                continue;
            };
            let best = result.best_passing_item();
            pending.push((
                scan_number,
                result.passed(),
                best.and_then(|item| item.rank),
                best.and_then(|item| item.peptide_ref.clone()),
            ));
        }

        // Peptides are normally listed before the results, but resolve after
        // the full pass so document order does not matter.
        let mut identifications = IdentificationMap::new();
        for (scan_number, passed, rank, peptide_ref) in pending {
            let peptide = peptide_ref.and_then(|r| self.peptide_sequence(&r).map(str::to_string));
            identifications.insert(
                scan_number,
                Identification {
                    passed,
                    peptide,
                    rank,
                },
            );
        }

        Ok((identifications, self.stats))
    }
}

/// Read an mzIdentML file into a scan to identification map.
///
/// `.gz` files are decompressed on the fly.
#[cfg(feature = "mzid")]
pub fn read_mzid_file<P: AsRef<Path>>(
    path: P,
) -> Result<(IdentificationMap, MzIdParseStats), MzIdError> {
    let path = path.as_ref();
    info!("Parsing mzIdentML file: {}", path.display());

    let reader = MzIdentMlReader::new(crate::io::open_input(path)?);
    let (identifications, stats) = reader.read_identifications()?;

    info!(
        "Finished parsing mzIdentML file. {}; {} scans, {} passing threshold",
        stats,
        identifications.len(),
        identifications.passed_count()
    );
    Ok((identifications, stats))
}
