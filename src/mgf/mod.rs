//! Streaming MGF parser
//!
//! Reads Mascot Generic Format files one ion block at a time:
//!
//! ```text
//! BEGIN IONS
//! TITLE=run.1.1. File:"run.raw", NativeID:"controllerType=0 controllerNumber=1 scan=1"
//! RTINSECONDS=60.5
//! PEPMASS=512.7731 1534000.0
//! CHARGE=2+
//! 147.1128 1200.0
//! 262.1397 800.5
//! END IONS
//! ```
//!
//! Malformed blocks are dropped with a warning and counted in
//! [`MgfParseStats`]; only I/O and encoding failures abort the read.

use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use log::info;

pub use error::MgfError;
pub use models::{MgfParseStats, MgfScan, Peak, SkipReason};

mod error;
mod models;
mod reader;


/// Streaming reader over the scans of an MGF file
pub struct MgfReader<R: BufRead> {
    reader: R,
    buffer: String,
    line_number: usize,
    seen_scans: HashSet<u64>,
    stats: MgfParseStats,
    done: bool,
}

impl<R: BufRead> MgfReader<R> {
    /// Create a new reader from a BufRead source
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line_number: 0,
            seen_scans: HashSet::new(),
            stats: MgfParseStats::default(),
            done: false,
        }
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &MgfParseStats {
        &self.stats
    }

    /// Iterate over all remaining scans
    pub fn scans(self) -> ScanIterator<R> {
        ScanIterator { reader: self }
    }
}

/// Iterator over scans in an MGF file
pub struct ScanIterator<R: BufRead> {
    reader: MgfReader<R>,
}

impl<R: BufRead> ScanIterator<R> {
    /// Counters accumulated so far
    pub fn stats(&self) -> &MgfParseStats {
        self.reader.stats()
    }
}

impl<R: BufRead> Iterator for ScanIterator<R> {
    type Item = Result<MgfScan, MgfError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.next_scan() {
            Ok(Some(scan)) => Some(Ok(scan)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Read every scan of an MGF file into memory.
///
/// `.gz` files are decompressed on the fly.
pub fn read_mgf_file<P: AsRef<Path>>(path: P) -> Result<(Vec<MgfScan>, MgfParseStats), MgfError> {
    let path = path.as_ref();
    info!("Parsing MGF file: {}", path.display());

    let mut reader = MgfReader::new(crate::io::open_input(path)?);
    let mut scans = Vec::new();
    while let Some(scan) = reader.next_scan()? {
        scans.push(scan);
    }

    info!("Finished parsing MGF file. {}", reader.stats());
    Ok((scans, reader.stats().clone()))
}
