use anyhow::{bail, Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use mzweight::converter::{ConversionConfig, ConversionStats, ScanTableConverter};

use super::{Config, ProcessArgs};

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    Ok(())
}

/// Merge flags over config file values
fn conversion_config(
    args: ProcessArgs,
    positional_targets: Option<PathBuf>,
    config: &Config,
) -> Result<ConversionConfig> {
    let targets_path = match (positional_targets, args.targets) {
        (Some(_), Some(_)) => bail!("Targets given both positionally and with --targets"),
        (positional, flag) => positional.or(flag),
    };
    if let Some(path) = &targets_path {
        require_file(path, "Targets")?;
    }

    Ok(ConversionConfig {
        targets_path,
        target_report: args
            .target_report
            .map(Into::into)
            .or(config.process.target_report)
            .unwrap_or_default(),
        default_tolerance_unit: args
            .default_tolerance_unit
            .map(Into::into)
            .or(config.process.default_tolerance_unit)
            .unwrap_or_default(),
    })
}

fn log_stats(stats: &ConversionStats, output: &Path) {
    info!("Conversion complete!");
    info!("  Output: {}", output.display());
    info!("  Scans written: {}", stats.scans_written);
    info!("  Identified scans: {}", stats.identified_scans);
    if stats.orphaned_identifications > 0 {
        info!(
            "  Identifications without spectrum: {}",
            stats.orphaned_identifications
        );
    }
    if stats.skipped_blocks > 0 {
        info!("  Skipped MGF blocks: {}", stats.skipped_blocks);
    }
    for (label, hits) in &stats.target_hits {
        info!("  Target {}: {} scans", label, hits);
    }
}

/// Join mzIdentML identifications onto MGF scans
#[cfg(feature = "mzid")]
pub fn run_mgf_mzid(files: Vec<PathBuf>, args: ProcessArgs, config: &Config) -> Result<()> {
    let mut files = files.into_iter();
    let (mgf, targets, mzid, output) = match (files.next(), files.next(), files.next(), files.next()) {
        (Some(mgf), Some(mzid), Some(output), None) => (mgf, None, mzid, output),
        (Some(mgf), Some(targets), Some(mzid), Some(output)) => (mgf, Some(targets), mzid, output),
        _ => bail!("Expected <MGF> [TARGETS] <MZID> <OUTPUT>"),
    };

    require_file(&mgf, "MGF")?;
    require_file(&mzid, "mzIdentML")?;
    let conversion = conversion_config(args, targets, config)?;

    info!("mzweight - MGF + mzIdentML to scan table");
    info!("========================================");
    info!("MGF:       {}", mgf.display());
    info!("mzIdentML: {}", mzid.display());
    if let Some(path) = &conversion.targets_path {
        info!("Targets:   {}", path.display());
    }

    let stats = ScanTableConverter::with_config(conversion)
        .convert_with_identifications(&mgf, &mzid, &output)
        .context("Conversion failed")?;
    log_stats(&stats, &output);
    Ok(())
}

/// Write a scan table from an MGF file alone
pub fn run_mgf(
    mgf: PathBuf,
    output: PathBuf,
    targets: Option<PathBuf>,
    args: ProcessArgs,
    config: &Config,
) -> Result<()> {
    require_file(&mgf, "MGF")?;
    let conversion = conversion_config(args, targets, config)?;

    info!("mzweight - MGF to scan table");
    info!("============================");
    info!("MGF: {}", mgf.display());

    let stats = ScanTableConverter::with_config(conversion)
        .convert_spectra(&mgf, &output)
        .context("Conversion failed")?;
    log_stats(&stats, &output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let config = Config::from_str(
            r#"
            [process]
            target_report = "intensity"
            default_tolerance_unit = "ppm"
            "#,
        )
        .unwrap();
        let args = ProcessArgs {
            target_report: Some(crate::cli::TargetReportArg::Flag),
            ..Default::default()
        };

        let merged = conversion_config(args, None, &config).unwrap();
        assert_eq!(merged.target_report, mzweight::table::TargetReport::Flag);
        assert_eq!(
            merged.default_tolerance_unit,
            mzweight::targets::ToleranceUnit::Ppm
        );
    }

    #[test]
    fn test_missing_mgf_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let mgf = dir.path().join("absent.mgf");
        let err = run_mgf(
            mgf.clone(),
            dir.path().join("out.csv"),
            None,
            ProcessArgs::default(),
            &Config::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains(&mgf.display().to_string()));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[cfg(feature = "mzid")]
    #[test]
    fn test_missing_mzid_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let mgf = dir.path().join("run.mgf");
        std::fs::write(&mgf, "BEGIN IONS\nTITLE=scan=1\nPEPMASS=500.0\nEND IONS\n").unwrap();
        let mzid = dir.path().join("absent.mzid");

        let err = run_mgf_mzid(
            vec![mgf, mzid.clone(), dir.path().join("out.csv")],
            ProcessArgs::default(),
            &Config::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains(&mzid.display().to_string()));

        let absent_mgf = dir.path().join("absent.mgf");
        let err = run_mgf_mzid(
            vec![absent_mgf.clone(), mzid, dir.path().join("out.csv")],
            ProcessArgs::default(),
            &Config::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains(&absent_mgf.display().to_string()));
    }

    #[test]
    fn test_missing_targets_names_path() {
        let targets = PathBuf::from("/nonexistent/targets.csv");
        let err = conversion_config(ProcessArgs::default(), Some(targets.clone()), &Config::default())
            .unwrap_err();
        assert!(err.to_string().contains(&targets.display().to_string()));
    }

    #[test]
    fn test_targets_given_twice() {
        let args = ProcessArgs {
            targets: Some(PathBuf::from("a.csv")),
            ..Default::default()
        };
        let result = conversion_config(args, Some(PathBuf::from("b.csv")), &Config::default());
        assert!(result.is_err());
    }
}
