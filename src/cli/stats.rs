use anyhow::{bail, Context, Result};
use log::info;
use std::io::Write;
use std::path::PathBuf;

use mzweight::io::create_output;
use mzweight::stats::summarize_table_file;

/// Summarise identification rates of a scan table
pub fn run(input: PathBuf, output: PathBuf, json: bool) -> Result<()> {
    if !input.exists() {
        bail!("Input file does not exist: {}", input.display());
    }

    let report = summarize_table_file(&input)
        .with_context(|| format!("Failed to summarise {}", input.display()))?;
    info!("{}", report.overall);

    let to_stdout = output.as_os_str() == "-";
    let text = if json {
        report.to_json()?
    } else if to_stdout {
        // Use colorized output if available
        report.format_colored()
    } else {
        report.to_string()
    };

    let mut writer = create_output(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    writeln!(writer, "{}", text.trim_end())?;
    writer.flush()?;

    if !to_stdout {
        info!("Report written to {}", output.display());
    }
    Ok(())
}
