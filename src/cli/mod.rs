use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use mzweight::table::TargetReport;
use mzweight::targets::ToleranceUnit;

mod annotate;
mod config;
mod overlap;
mod process;
mod stats;

pub use config::Config;

/// mzweight - intensity-weighted identification rates for MGF + mzIdentML data
#[derive(Parser)]
#[command(name = "mzweight")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// How target columns are filled.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TargetReportArg {
    /// yes / no
    Flag,
    /// Summed intensity of matching peaks
    Intensity,
}

/// Unit for targets without a tolerance_type column.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ToleranceUnitArg {
    /// Dalton
    Da,
    /// Parts per million
    Ppm,
}

impl From<TargetReportArg> for TargetReport {
    fn from(arg: TargetReportArg) -> Self {
        match arg {
            TargetReportArg::Flag => TargetReport::Flag,
            TargetReportArg::Intensity => TargetReport::Intensity,
        }
    }
}

impl From<ToleranceUnitArg> for ToleranceUnit {
    fn from(arg: ToleranceUnitArg) -> Self {
        match arg {
            ToleranceUnitArg::Da => ToleranceUnit::Da,
            ToleranceUnitArg::Ppm => ToleranceUnit::Ppm,
        }
    }
}

/// Options shared by the table-producing commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProcessArgs {
    /// CSV list of fragment ion targets (m/z,tolerance[,tolerance_type])
    #[arg(short = 't', long, value_name = "FILE")]
    targets: Option<PathBuf>,

    /// Target cell format (flag, intensity)
    #[arg(long, value_enum)]
    target_report: Option<TargetReportArg>,

    /// Unit for targets without a tolerance_type (da, ppm)
    #[arg(long, value_enum)]
    default_tolerance_unit: Option<ToleranceUnitArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Join mzIdentML identifications onto MGF scans and write a scan table
    ///
    /// Positional form: <MGF> [TARGETS] <MZID> <OUTPUT>
    #[cfg(feature = "mzid")]
    MgfMzid {
        /// MGF file, optional targets CSV, mzIdentML file and output CSV
        #[arg(value_name = "FILES", num_args = 3..=4, required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        process: ProcessArgs,
    },

    /// Write a scan table from an MGF file alone
    Mgf {
        /// Input MGF file
        #[arg(value_name = "MGF")]
        mgf: PathBuf,

        /// Output CSV file (- for stdout)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Targets CSV (same as --targets)
        #[arg(value_name = "TARGETS")]
        targets_file: Option<PathBuf>,

        #[command(flatten)]
        process: ProcessArgs,
    },

    /// Summarise identification rates of a scan table
    ///
    /// Precursor intensities are the PEPMASS values written by the raw file
    /// converter, not XIC areas.
    Stats {
        /// Scan table written by mgf-mzid
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Report file (- for stdout)
        #[arg(value_name = "OUTPUT", default_value = "-")]
        output: PathBuf,

        /// Write the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append GN=<symbol> to RefSeq FASTA headers using an NCBI feature table
    AnnotateFasta {
        /// Input FASTA file
        #[arg(value_name = "FASTA")]
        fasta: PathBuf,

        /// NCBI feature table (TSV with product_accession and symbol columns)
        #[arg(value_name = "FEATURE_TABLE")]
        feature_table: PathBuf,

        /// Output FASTA file (- for stdout)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Rewrite Ensembl transcript FASTA headers as >sp|ID|GENE_SPECIES ID GN=GENE
    UniprotHeaders {
        /// Input FASTA file
        #[arg(value_name = "FASTA")]
        fasta: PathBuf,

        /// Output FASTA file (- for stdout)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Species mnemonic appended to gene names
        #[arg(long, default_value = mzweight::fasta::DEFAULT_SPECIES)]
        species: String,
    },

    /// Count peptides shared between lists (one sequence per line)
    PeptideOverlap {
        /// Peptide list files
        #[arg(value_name = "FILES", num_args = 2.., required = true)]
        files: Vec<PathBuf>,

        /// Skip the first line of every file
        #[arg(long)]
        header: bool,

        /// Number of combinations to report
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Write the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        #[cfg(feature = "mzid")]
        Commands::MgfMzid { files, process } => process::run_mgf_mzid(files, process, &config),
        Commands::Mgf {
            mgf,
            output,
            targets_file,
            process,
        } => process::run_mgf(mgf, output, targets_file, process, &config),
        Commands::Stats {
            input,
            output,
            json,
        } => stats::run(input, output, json || config.stats.json.unwrap_or(false)),
        Commands::AnnotateFasta {
            fasta,
            feature_table,
            output,
        } => annotate::run(fasta, feature_table, output),
        Commands::UniprotHeaders {
            fasta,
            output,
            species,
        } => annotate::run_uniprot(fasta, output, &species),
        Commands::PeptideOverlap {
            files,
            header,
            top,
            json,
        } => overlap::run(files, header, top, json),
    }
}
