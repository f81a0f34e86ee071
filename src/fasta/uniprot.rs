//! UniProt style headers for Ensembl transcript FASTA files
//!
//! ```text
//! >ENST00000343518.POTEH.43096 JAUMIU010000140:8603-8709
//! >TMEM129-like.CM061257:895302-901188
//! ```
//!
//! becomes
//!
//! ```text
//! >sp|ENST00000343518|POTEH_TABRA ENST00000343518 GN=POTEH
//! >sp|ENST00000343518_2|TMEM129-like_TABRA ENST00000343518_2 GN=TMEM129-like
//! ```
//!
//! Repeated IDs get a `_N` counter. Headers without an Ensembl ID borrow the
//! last one seen, with the next counter value.

use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

use log::info;
use serde::Serialize;

use super::AnnotateError;

/// Species mnemonic used when none is given
pub const DEFAULT_SPECIES: &str = "TABRA";

const ENSEMBL_PREFIXES: [&str; 2] = ["ENST", "ENSMUST"];

/// Counters from one header conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeaderConversionStats {
    /// Header lines converted
    pub records: usize,
    /// Headers that borrowed the previous Ensembl ID
    pub inherited: usize,
}

impl fmt::Display for HeaderConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} FASTA headers converted ({} without their own Ensembl ID)",
            self.records, self.inherited
        )
    }
}

/// Stateful header rewriter; IDs are numbered in input order
#[derive(Debug, Clone)]
pub struct UniProtHeaderConverter {
    species: String,
    counters: HashMap<String, usize>,
    last_id: Option<String>,
    stats: HeaderConversionStats,
}

impl Default for UniProtHeaderConverter {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIES)
    }
}

impl UniProtHeaderConverter {
    /// Create a converter writing `<GENE>_<species>` entry names
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            counters: HashMap::new(),
            last_id: None,
            stats: HeaderConversionStats::default(),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> HeaderConversionStats {
        self.stats
    }

    /// Next value of the counter for `id`
    fn bump(&mut self, id: &str) -> usize {
        let count = self.counters.entry(id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Convert one header line (with or without the leading `>`)
    pub fn convert(&mut self, header: &str) -> Result<String, AnnotateError> {
        let header = header.trim();
        let main_id = header
            .strip_prefix('>')
            .unwrap_or(header)
            .split_whitespace()
            .next()
            .ok_or_else(|| AnnotateError::UnexpectedHeader(header.to_string()))?;

        let (unique_id, gene) = if ENSEMBL_PREFIXES.iter().any(|p| main_id.starts_with(p)) {
            let mut segments = main_id.split('.');
            let (Some(id), Some(gene), Some(_)) =
                (segments.next(), segments.next(), segments.next())
            else {
                return Err(AnnotateError::UnexpectedHeader(header.to_string()));
            };

            let unique_id = match self.bump(id) {
                1 => id.to_string(),
                n => format!("{}_{}", id, n),
            };
            self.last_id = Some(unique_id.clone());
            (unique_id, gene.to_string())
        } else {
            let last_id = self
                .last_id
                .clone()
                .ok_or_else(|| AnnotateError::NoEnsemblId(header.to_string()))?;
            let n = self.bump(&last_id);
            self.stats.inherited += 1;
            // Gene name is everything before the first '.', so "-like" survives
            let gene = main_id.split('.').next().unwrap_or(main_id);
            (format!("{}_{}", last_id, n), gene.to_string())
        };

        self.stats.records += 1;
        Ok(format!(
            ">sp|{id}|{gene}_{species} {id} GN={gene}",
            id = unique_id,
            gene = gene,
            species = self.species
        ))
    }
}

/// Rewrite every header of a FASTA stream; other lines are trimmed and copied
pub fn convert_fasta_headers<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    species: &str,
) -> Result<HeaderConversionStats, AnnotateError> {
    let mut converter = UniProtHeaderConverter::new(species);

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.starts_with('>') {
            writeln!(writer, "{}", converter.convert(line)?)?;
        } else {
            writeln!(writer, "{}", line)?;
        }
    }

    writer.flush()?;
    Ok(converter.stats())
}

/// Convert the headers of a FASTA file, writing to `output`
pub fn convert_fasta_headers_file<P, O>(
    fasta: P,
    output: O,
    species: &str,
) -> Result<HeaderConversionStats, AnnotateError>
where
    P: AsRef<Path>,
    O: AsRef<Path>,
{
    let stats = convert_fasta_headers(
        crate::io::open_input(fasta)?,
        crate::io::create_output(output)?,
        species,
    )?;
    info!("{}", stats);
    Ok(stats)
}
