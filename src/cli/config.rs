//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in
//! a config file; command line flags take precedence:
//!
//! ```toml
//! # mzweight.toml
//! [process]
//! target_report = "intensity"
//! default_tolerance_unit = "ppm"
//!
//! [stats]
//! json = true
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mzweight::table::TargetReport;
use mzweight::targets::ToleranceUnit;

/// Root configuration structure for mzweight.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Settings for mgf and mgf-mzid.
    #[serde(default)]
    pub process: ProcessConfig,

    /// Settings for stats.
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Configuration for the table-producing commands.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessConfig {
    /// Target cell format.
    pub target_report: Option<TargetReport>,

    /// Unit for targets without a tolerance_type.
    pub default_tolerance_unit: Option<ToleranceUnit>,
}

/// Configuration for the stats command.
#[derive(Debug, Default, Deserialize)]
pub struct StatsConfig {
    /// Write JSON instead of text.
    pub json: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
