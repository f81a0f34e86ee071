//! Integration tests for mzweight
//!
//! These tests run the full pipeline from MGF/mzIdentML files on disk to a
//! scan table and its identification summary.

use mzweight::converter::{ConversionConfig, ScanTableConverter};
use mzweight::fasta::annotate_fasta_file;
use mzweight::mgf::MgfReader;
use mzweight::stats::{summarize_table_file, IdentificationReport};
use mzweight::table::{read_scan_table_file, TargetReport};
use mzweight::targets::ToleranceUnit;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const MGF: &str = r#"MASS=Monoisotopic
BEGIN IONS
TITLE=run.1.1. File:"run.raw", NativeID:"controllerType=0 controllerNumber=1 scan=1"
RTINSECONDS=10.5
PEPMASS=500.25 1000.0
CHARGE=2+
126.1278 50.0
204.0867 25.0
500.0 25.0
END IONS
BEGIN IONS
TITLE=run.2.2. File:"run.raw", NativeID:"controllerType=0 controllerNumber=1 scan=2"
RTINSECONDS=11.0
PEPMASS=600.5 3000.0
CHARGE=3+
204.0870 300.0
END IONS
BEGIN IONS
TITLE=run.3.3. File:"run.raw", NativeID:"controllerType=0 controllerNumber=1 scan=3"
RTINSECONDS=12.0
PEPMASS=700.75 6000.0
150.0 600.0
END IONS
BEGIN IONS
TITLE=broken block without precursor, scan=4
150.0 600.0
END IONS
"#;

const MZID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MzIdentML xmlns="http://psidev.info/psi/pi/mzIdentML/1.1" id="it" version="1.1.0">
  <SequenceCollection>
    <Peptide id="PEP_1"><PeptideSequence>PEPTIDEK</PeptideSequence></Peptide>
    <Peptide id="PEP_2"><PeptideSequence>ELVISLIVESK</PeptideSequence></Peptide>
  </SequenceCollection>
  <DataCollection>
    <AnalysisData>
      <SpectrumIdentificationList id="SIL_1">
        <SpectrumIdentificationResult id="SIR_1" spectrumID="controllerType=0 controllerNumber=1 scan=1" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_1" rank="1" passThreshold="true" peptide_ref="PEP_1"/>
        </SpectrumIdentificationResult>
        <SpectrumIdentificationResult id="SIR_2" spectrumID="controllerType=0 controllerNumber=1 scan=2" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_2" rank="1" passThreshold="false" peptide_ref="PEP_2"/>
        </SpectrumIdentificationResult>
        <SpectrumIdentificationResult id="SIR_3" spectrumID="controllerType=0 controllerNumber=1 scan=3" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_3" rank="1" passThreshold="true" peptide_ref="PEP_2"/>
        </SpectrumIdentificationResult>
        <SpectrumIdentificationResult id="SIR_9" spectrumID="controllerType=0 controllerNumber=1 scan=9" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_9" rank="1" passThreshold="true" peptide_ref="PEP_1"/>
        </SpectrumIdentificationResult>
      </SpectrumIdentificationList>
    </AnalysisData>
  </DataCollection>
</MzIdentML>
"#;

const TARGETS: &str = "m/z,tolerance,tolerance_type\n126.1277,10,ppm\n204.0867,0.001,Da\n";

fn write_inputs(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let mgf = dir.join("run.mgf");
    let mzid = dir.join("run.mzid");
    let targets = dir.join("targets.csv");
    fs::write(&mgf, MGF).unwrap();
    fs::write(&mzid, MZID).unwrap();
    fs::write(&targets, TARGETS).unwrap();
    (mgf, mzid, targets)
}

/// MGF + mzIdentML + targets to a scan table, then summarised
#[test]
fn test_mgf_mzid_pipeline() {
    let dir = tempdir().unwrap();
    let (mgf, mzid, targets) = write_inputs(dir.path());
    let output = dir.path().join("scans.csv");

    let stats = ScanTableConverter::new()
        .with_targets(&targets)
        .convert_with_identifications(&mgf, &mzid, &output)
        .unwrap();

    assert_eq!(stats.scans_written, 3);
    assert_eq!(stats.identified_scans, 2);
    assert_eq!(stats.orphaned_identifications, 1);
    assert_eq!(stats.skipped_blocks, 1);
    assert_eq!(
        stats.target_hits,
        vec![("126.1277".to_string(), 1), ("204.0867".to_string(), 2)]
    );

    let table = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines,
        vec![
            "scan_number,RT,pepmass,intensity,summed_ms2_intensity,126.1277,204.0867,pass_threshold,peptide",
            "1,10.5,500.25,1000.0,100.0,yes,yes,yes,PEPTIDEK",
            "2,11.0,600.5,3000.0,300.0,no,yes,no,",
            "3,12.0,700.75,6000.0,600.0,no,no,yes,ELVISLIVESK",
        ]
    );

    let report = summarize_table_file(&output).unwrap();
    assert_eq!(report.overall.total_scans, 3);
    assert_eq!(report.overall.identified_scans, 2);
    assert!((report.overall.unweighted_rate.unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert!((report.overall.precursor_weighted_rate.unwrap() - 0.7).abs() < 1e-12);
    assert!((report.overall.ms2_weighted_rate.unwrap() - 0.7).abs() < 1e-12);

    // Scans with 204.0867: 1 (identified) and 2 (not identified)
    let target = &report.targets[1];
    assert_eq!(target.label, "204.0867");
    assert_eq!(target.summary.total_scans, 2);
    assert_eq!(target.summary.precursor_weighted_rate, Some(0.25));
}

/// Summarising the same table twice gives the same report
#[test]
fn test_summary_is_repeatable() {
    let dir = tempdir().unwrap();
    let (mgf, mzid, _) = write_inputs(dir.path());
    let output = dir.path().join("scans.csv");

    ScanTableConverter::new()
        .convert_with_identifications(&mgf, &mzid, &output)
        .unwrap();

    let first = summarize_table_file(&output).unwrap();
    let second = summarize_table_file(&output).unwrap();
    assert_eq!(first, second);

    let contents = read_scan_table_file(&output).unwrap();
    assert_eq!(IdentificationReport::from_table(&contents).overall, first.overall);
}

/// Spectra-only tables with intensity target cells and gzip input
#[test]
fn test_mgf_only_gzip_intensity_report() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let dir = tempdir().unwrap();
    let (_, _, targets) = write_inputs(dir.path());
    let mgf = dir.path().join("run.mgf.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&mgf).unwrap(), Compression::default());
    encoder.write_all(MGF.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let output = dir.path().join("spectra.csv");
    let converter = ScanTableConverter::with_config(ConversionConfig {
        targets_path: Some(targets),
        target_report: TargetReport::Intensity,
        default_tolerance_unit: ToleranceUnit::Da,
    });
    let stats = converter.convert_spectra(&mgf, &output).unwrap();
    assert_eq!(stats.scans_written, 3);

    let table = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines[0],
        "scan_number,RT,pepmass,intensity,MS2_sum,126.1277,204.0867"
    );
    assert_eq!(lines[1], "1,10.5,500.25,1000.0,100.0,50.0,25.0");
    assert_eq!(lines[2], "2,11.0,600.5,3000.0,300.0,,300.0");
}

/// RefSeq headers get gene symbols appended
#[test]
fn test_annotate_fasta_file() {
    let dir = tempdir().unwrap();
    let fasta = dir.path().join("proteome.fasta");
    let table = dir.path().join("feature_table.txt");
    let output = dir.path().join("annotated.fasta");

    fs::write(
        &fasta,
        ">NP_000005.3 alpha-2-macroglobulin\nMGKNKLLHPS\n>NP_000014.1 unknown\nMKWVTF\n",
    )
    .unwrap();
    fs::write(
        &table,
        "# feature\tclass\tproduct_accession\tsymbol\nCDS\twith_protein\tNP_000005.3\tA2M\n",
    )
    .unwrap();

    let stats = annotate_fasta_file(&fasta, &table, &output).unwrap();
    assert_eq!(stats.records, 2);
    assert_eq!(stats.annotated, 1);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        ">NP_000005.3 alpha-2-macroglobulin GN=A2M\nMGKNKLLHPS\n>NP_000014.1 unknown\nMKWVTF\n"
    );
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The MGF reader never panics and yields each scan number at most once
        #[test]
        fn test_mgf_reader_arbitrary_input(
            lines in prop::collection::vec(
                "(BEGIN IONS|END IONS|PEPMASS=[0-9. ]{0,12}|TITLE=scan=[0-9]{1,2}|SCANS=[0-9]{1,2}|[0-9. ]{0,15}|.{0,20})",
                0..60,
            )
        ) {
            let input = lines.join("\n");
            let mut seen = std::collections::HashSet::new();
            for scan in MgfReader::new(Cursor::new(input.into_bytes())).scans() {
                let scan = scan.unwrap();
                prop_assert!(seen.insert(scan.scan_number));
            }
        }

        /// Rates always lie in [0, 1]
        #[test]
        fn test_rates_are_fractions(
            rows in prop::collection::vec((0.0f64..1e9, 0.0f64..1e9, any::<bool>()), 0..50)
        ) {
            let records: Vec<_> = rows
                .iter()
                .map(|&(precursor, ms2, identified)| mzweight::table::TableRecord {
                    scan_number: None,
                    precursor_intensity: precursor,
                    summed_ms2_intensity: ms2,
                    identified,
                    target_hits: vec![],
                })
                .collect();
            let report = IdentificationReport::from_records(&records, &[]);
            for rate in [
                report.overall.unweighted_rate,
                report.overall.precursor_weighted_rate,
                report.overall.ms2_weighted_rate,
            ]
            .into_iter()
            .flatten()
            {
                prop_assert!((0.0..=1.0 + 1e-12).contains(&rate));
            }
        }
    }
}
