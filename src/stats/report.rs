use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::{format_rate, IdentificationReport, IdentificationSummary};

const TITLE: &str = "Identification Rate Summary";
const RULE: &str = "===========================";

fn summary_lines(summary: &IdentificationSummary) -> [(&'static str, String); 5] {
    [
        ("Total scans", summary.total_scans.to_string()),
        ("Identified scans", summary.identified_scans.to_string()),
        ("ID rate (scan count)", format_rate(summary.unweighted_rate)),
        (
            "ID rate (precursor intensity weighted)",
            format_rate(summary.precursor_weighted_rate),
        ),
        (
            "ID rate (MS2 intensity weighted)",
            format_rate(summary.ms2_weighted_rate),
        ),
    ]
}

impl IdentificationReport {
    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style(TITLE).bold().cyan()));
            output.push_str(&format!("{}\n", style(RULE).cyan()));
            if let Some(source) = &self.source {
                output.push_str(&format!("{}: {}\n", style("Input").bold(), source));
            }
            output.push('\n');

            for (label, value) in summary_lines(&self.overall) {
                output.push_str(&format!("{:<40} {}\n", format!("{}:", label), style(value).green()));
            }

            if !self.targets.is_empty() {
                output.push('\n');
                output.push_str(&format!("{}\n", style("Targets").bold().cyan()));
                for target in &self.targets {
                    output.push_str(&format!(
                        "  {}: {}\n",
                        style(&target.label).bold(),
                        target.summary
                    ));
                }
            }

            if self.skipped_rows > 0 {
                output.push('\n');
                output.push_str(&format!(
                    "{}: {} table rows could not be parsed\n",
                    style("WARNING").yellow().bold(),
                    self.skipped_rows
                ));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for IdentificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", RULE)?;
        if let Some(source) = &self.source {
            writeln!(f, "Input: {}", source)?;
        }
        writeln!(f)?;

        for (label, value) in summary_lines(&self.overall) {
            writeln!(f, "{:<40} {}", format!("{}:", label), value)?;
        }

        if !self.targets.is_empty() {
            writeln!(f)?;
            writeln!(f, "Targets")?;
            for target in &self.targets {
                writeln!(f, "  {}: {}", target.label, target.summary)?;
            }
        }

        if self.skipped_rows > 0 {
            writeln!(f)?;
            writeln!(f, "WARNING: {} table rows could not be parsed", self.skipped_rows)?;
        }

        Ok(())
    }
}
