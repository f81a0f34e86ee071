use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;

use mzweight::fasta::{annotate_fasta_file, convert_fasta_headers_file};

/// Append gene symbols to RefSeq FASTA headers
pub fn run(fasta: PathBuf, feature_table: PathBuf, output: PathBuf) -> Result<()> {
    if !fasta.exists() {
        bail!("FASTA file does not exist: {}", fasta.display());
    }
    if !feature_table.exists() {
        bail!("Feature table does not exist: {}", feature_table.display());
    }

    info!("mzweight - FASTA gene symbol annotation");
    info!("=======================================");
    info!("FASTA:         {}", fasta.display());
    info!("Feature table: {}", feature_table.display());

    let stats = annotate_fasta_file(&fasta, &feature_table, &output)
        .context("Annotation failed")?;

    info!("Annotation complete!");
    info!("  Records: {}", stats.records);
    info!("  Annotated: {}", stats.annotated);
    info!("  Output: {}", output.display());
    Ok(())
}

/// Rewrite Ensembl FASTA headers in UniProt style
pub fn run_uniprot(fasta: PathBuf, output: PathBuf, species: &str) -> Result<()> {
    if !fasta.exists() {
        bail!("FASTA file does not exist: {}", fasta.display());
    }

    info!("mzweight - UniProt style FASTA headers");
    info!("======================================");
    info!("FASTA:   {}", fasta.display());
    info!("Species: {}", species);

    let stats = convert_fasta_headers_file(&fasta, &output, species)
        .context("Header conversion failed")?;

    info!("Conversion complete!");
    info!("  Headers: {}", stats.records);
    info!("  Inherited IDs: {}", stats.inherited);
    info!("  Output: {}", output.display());
    Ok(())
}
