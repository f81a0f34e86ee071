//! # mzweight - intensity-weighted identification rates
//!
//! `mzweight` joins MS/MS spectra from MGF files with peptide identifications
//! from mzIdentML files and reports how much of the measured signal was
//! identified, not just how many spectra.
//!
//! ## Pipeline
//!
//! 1. [`mgf`] streams scan blocks into [`mgf::MgfScan`] records
//! 2. [`mzid`] builds a scan number to identification map
//! 3. [`targets`] optionally checks every scan for fragment ions of interest
//! 4. [`join`] produces one [`join::ScanRow`] per scan
//! 5. [`table`] writes the rows as CSV
//! 6. [`stats`] turns a table back into identification rates
//!
//! Two smaller toolsets live alongside: [`fasta`] annotates RefSeq FASTA
//! headers with gene symbols from an NCBI feature table and rewrites Ensembl
//! headers in UniProt style, and [`overlap`] counts peptides shared between
//! search result lists.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mzweight::converter::ScanTableConverter;
//! use mzweight::stats::summarize_table_file;
//!
//! let converter = ScanTableConverter::new().with_targets("targets.csv");
//! let stats = converter.convert_with_identifications("run.mgf", "run.mzid", "scans.csv")?;
//! println!("{}", stats);
//!
//! let report = summarize_table_file("scans.csv")?;
//! println!("{}", report);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Caveat
//!
//! Precursor intensities come from the `PEPMASS` line written by the raw file
//! converter. They are a proxy for ion abundance, not an XIC area.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod converter;
pub mod fasta;
pub mod io;
pub mod join;
pub mod mgf;
pub mod mzid;
pub mod overlap;
pub mod scan_number;
pub mod stats;
pub mod table;
pub mod targets;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::converter::{
        ConversionConfig, ConversionError, ConversionStats, ScanTableConverter,
    };
    pub use crate::fasta::{annotate_fasta, read_feature_table, AnnotateError, AnnotationStats};
    pub use crate::fasta::{convert_fasta_headers, UniProtHeaderConverter};
    pub use crate::join::{build_rows, JoinOutput, RowIdentification, ScanRow};
    pub use crate::mgf::{read_mgf_file, MgfError, MgfParseStats, MgfReader, MgfScan, Peak};
    #[cfg(feature = "mzid")]
    pub use crate::mzid::{read_mzid_file, MzIdError, MzIdentMlReader};
    pub use crate::mzid::{Identification, IdentificationMap};
    pub use crate::overlap::{OverlapError, OverlapReport, PeptideList};
    pub use crate::stats::{IdentificationReport, IdentificationSummary, StatsError};
    pub use crate::table::{
        read_scan_table, ScanTableWriter, TableError, TableLayout, TableRecord, TargetReport,
    };
    pub use crate::targets::{read_targets, Target, TargetMatch, Tolerance, ToleranceUnit};
}
