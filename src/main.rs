//! # mzweight
//!
//! Command-line front end for intensity-weighted identification rates.
//!
//! ## Usage
//!
//! ```bash
//! # Join identifications onto scans (targets are optional)
//! mzweight mgf-mzid run.mgf targets.csv run.mzid scans.csv
//!
//! # Scan table without identifications
//! mzweight mgf run.mgf scans.csv targets.csv
//!
//! # Identification rates of a scan table
//! mzweight stats scans.csv summary.txt
//!
//! # Gene symbols for RefSeq headers
//! mzweight annotate-fasta proteome.fasta feature_table.txt annotated.fasta
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
