//! Gene symbol annotation of RefSeq FASTA headers
//!
//! NCBI publishes a feature table next to every RefSeq proteome that maps
//! product accessions to gene symbols:
//!
//! ```text
//! # feature	class	assembly	...	product_accession	...	symbol	...
//! CDS	with_protein	GCF_000001405.40	...	NP_000005.3	...	A2M	...
//! ```
//!
//! Headers whose accession appears in the table get a UniProt style
//! `GN=<symbol>` suffix:
//!
//! ```text
//! >NP_000005.3 alpha-2-macroglobulin isoform a precursor [Homo sapiens] GN=A2M
//! ```
//!
//! Ensembl transcript FASTA files get full UniProt style headers instead,
//! see [`uniprot`].

use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Read, Write};
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

pub use error::AnnotateError;
pub use uniprot::{
    convert_fasta_headers, convert_fasta_headers_file, HeaderConversionStats,
    UniProtHeaderConverter, DEFAULT_SPECIES,
};

mod error;
pub mod uniprot;

#[cfg(test)]
mod tests;

/// Feature table column holding the protein accession
pub const PRODUCT_ACCESSION_COLUMN: &str = "product_accession";
/// Feature table column holding the gene symbol
pub const SYMBOL_COLUMN: &str = "symbol";

/// Counters from one annotation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationStats {
    /// Header lines seen
    pub records: usize,
    /// Header lines that received a gene symbol
    pub annotated: usize,
}

impl fmt::Display for AnnotationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} FASTA records annotated",
            self.annotated, self.records
        )
    }
}

/// Read a tab separated feature table into an accession to symbol map
pub fn read_feature_table<R: Read>(reader: R) -> Result<HashMap<String, String>, AnnotateError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .quoting(false)
        .has_headers(true)
        .from_reader(reader);

    // NCBI writes the first header cell as "# feature"
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('#').trim().to_string())
        .collect();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| AnnotateError::MissingColumn(name.to_string()))
    };
    let accession_index = find(PRODUCT_ACCESSION_COLUMN)?;
    let symbol_index = find(SYMBOL_COLUMN)?;

    let mut symbols = HashMap::new();
    for record in csv_reader.records() {
        let record = record?;
        let accession = record.get(accession_index).unwrap_or_default().trim();
        let symbol = record.get(symbol_index).unwrap_or_default().trim();
        if accession.is_empty() || symbol.is_empty() {
            continue;
        }
        symbols
            .entry(accession.to_string())
            .or_insert_with(|| symbol.to_string());
    }

    Ok(symbols)
}

/// Load a feature table from a file
pub fn read_feature_table_file<P: AsRef<Path>>(
    path: P,
) -> Result<HashMap<String, String>, AnnotateError> {
    let path = path.as_ref();
    let symbols = read_feature_table(crate::io::open_input(path)?)?;
    info!(
        "Loaded {} accession to gene symbol mappings from {}",
        symbols.len(),
        path.display()
    );
    Ok(symbols)
}

/// Accession of a FASTA header line: its first token without the `>`
pub fn header_accession(header: &str) -> Option<&str> {
    header
        .strip_prefix('>')?
        .split_whitespace()
        .next()
}

/// Copy a FASTA stream, appending ` GN=<symbol>` to headers with a known accession
pub fn annotate_fasta<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    symbols: &HashMap<String, String>,
) -> Result<AnnotationStats, AnnotateError> {
    let mut stats = AnnotationStats::default();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        if !line.starts_with('>') {
            // Sequence lines keep their content; CRLF becomes LF
            writer.write_all(line.trim_end_matches(['\r', '\n']).as_bytes())?;
            if line.ends_with('\n') {
                writer.write_all(b"\n")?;
            }
            continue;
        }

        stats.records += 1;
        let header = line.trim_end();
        match header_accession(header).and_then(|acc| symbols.get(acc)) {
            Some(symbol) => {
                stats.annotated += 1;
                writeln!(writer, "{} GN={}", header, symbol)?;
            }
            None => {
                debug!("No gene symbol for header '{}'", header);
                writeln!(writer, "{}", header)?;
            }
        }
    }

    writer.flush()?;
    Ok(stats)
}

/// Annotate a FASTA file using a feature table, writing to `output`
pub fn annotate_fasta_file<P, Q, O>(
    fasta: P,
    feature_table: Q,
    output: O,
) -> Result<AnnotationStats, AnnotateError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    O: AsRef<Path>,
{
    let symbols = read_feature_table_file(feature_table)?;
    let stats = annotate_fasta(
        crate::io::open_input(fasta)?,
        crate::io::create_output(output)?,
        &symbols,
    )?;
    info!("{}", stats);
    Ok(stats)
}
