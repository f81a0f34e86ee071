use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;

use mzweight::overlap::compare_peptide_files;

/// Print list sizes and the largest overlaps between peptide lists
pub fn run(files: Vec<PathBuf>, skip_header: bool, top: usize, json: bool) -> Result<()> {
    for file in &files {
        if !file.exists() {
            bail!("Peptide list does not exist: {}", file.display());
        }
    }

    let mut report =
        compare_peptide_files(&files, skip_header).context("Peptide overlap failed")?;
    info!("{} combinations compared", report.overlaps.len());
    report.truncate(top);

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
