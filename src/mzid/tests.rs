use super::*;
use std::io::Cursor;

const MINIMAL_MZID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MzIdentML xmlns="http://psidev.info/psi/pi/mzIdentML/1.1" id="test" version="1.1.0">
  <SequenceCollection>
    <Peptide id="PEP_1">
      <PeptideSequence>PEPTIDEK</PeptideSequence>
    </Peptide>
    <Peptide id="PEP_2">
      <PeptideSequence>ELVISLIVESK</PeptideSequence>
    </Peptide>
  </SequenceCollection>
  <DataCollection>
    <AnalysisData>
      <SpectrumIdentificationList id="SIL_1">
        <SpectrumIdentificationResult id="SIR_1" spectrumID="index=0" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_1_1" rank="1" passThreshold="true" peptide_ref="PEP_1" chargeState="2">
            <cvParam cvRef="PSI-MS" accession="MS:1002049" name="MS-GF:RawScore" value="42"/>
          </SpectrumIdentificationItem>
          <cvParam cvRef="PSI-MS" accession="MS:1000796" name="spectrum title" value="run.1.1. File:&quot;run.raw&quot;, NativeID:&quot;controllerType=0 controllerNumber=1 scan=1&quot;"/>
        </SpectrumIdentificationResult>
        <SpectrumIdentificationResult id="SIR_2" spectrumID="index=1" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_2_1" rank="1" passThreshold="false" peptide_ref="PEP_2" chargeState="2"/>
          <cvParam cvRef="PSI-MS" accession="MS:1000796" name="spectrum title" value="run.2.2. NativeID:&quot;scan=2&quot;"/>
        </SpectrumIdentificationResult>
        <SpectrumIdentificationResult id="SIR_3" spectrumID="controllerType=0 controllerNumber=1 scan=3" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_3_1" rank="1" passThreshold="false" peptide_ref="PEP_1"/>
          <SpectrumIdentificationItem id="SII_3_2" rank="2" passThreshold="true" peptide_ref="PEP_2"/>
        </SpectrumIdentificationResult>
        <SpectrumIdentificationResult id="SIR_4" spectrumID="index=3" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_4_1" rank="1" passThreshold="true" peptide_ref="PEP_1"/>
        </SpectrumIdentificationResult>
        <SpectrumIdentificationResult id="SIR_5" spectrumID="index=4" spectraData_ref="SD_1">
          <SpectrumIdentificationItem id="SII_5_1" rank="1" passThreshold="true" peptide_ref="PEP_2"/>
          <cvParam cvRef="PSI-MS" accession="MS:1001115" name="scan number(s)" value="5"/>
        </SpectrumIdentificationResult>
      </SpectrumIdentificationList>
    </AnalysisData>
  </DataCollection>
</MzIdentML>"#;

fn parse(input: &str) -> (IdentificationMap, MzIdParseStats) {
    MzIdentMlReader::new(Cursor::new(input))
        .read_identifications()
        .unwrap()
}

#[test]
fn test_parse_minimal_mzid() {
    let (ids, stats) = parse(MINIMAL_MZID);

    assert_eq!(ids.len(), 4);
    assert_eq!(ids.passed_count(), 3);

    let first = ids.get(1).unwrap();
    assert!(first.passed);
    assert_eq!(first.peptide.as_deref(), Some("PEPTIDEK"));
    assert_eq!(first.rank, Some(1));

    let second = ids.get(2).unwrap();
    assert!(!second.passed);
    assert_eq!(second.peptide, None);

    assert_eq!(stats.results, 5);
    assert_eq!(stats.results_without_scan, 1);
    assert_eq!(stats.items, 6);
    assert_eq!(stats.peptides, 2);
}

#[test]
fn test_scan_from_spectrum_id_and_scan_cv_param() {
    let (ids, _) = parse(MINIMAL_MZID);

    let third = ids.get(3).unwrap();
    assert!(third.passed);
    assert_eq!(third.peptide.as_deref(), Some("ELVISLIVESK"));
    assert_eq!(third.rank, Some(2));

    assert!(ids.is_identified(5));
}

#[test]
fn test_absent_scans_are_unidentified() {
    let (ids, _) = parse(MINIMAL_MZID);
    assert!(!ids.is_identified(2));
    assert!(!ids.is_identified(4));
    assert!(!ids.is_identified(1000));
}

#[test]
fn test_next_result_streams_in_document_order() {
    let mut reader = MzIdentMlReader::new(Cursor::new(MINIMAL_MZID));

    let first = reader.next_result().unwrap().unwrap();
    assert_eq!(first.spectrum_id, "index=0");
    assert_eq!(first.scan_number, Some(1));
    assert_eq!(first.items.len(), 1);
    assert_eq!(reader.peptide_sequence("PEP_2"), Some("ELVISLIVESK"));

    let mut remaining = 0;
    while reader.next_result().unwrap().is_some() {
        remaining += 1;
    }
    assert_eq!(remaining, 4);
}

#[test]
fn test_prefixed_namespace_and_duplicate_scans() {
    let input = r#"<?xml version="1.0"?>
<mzid:MzIdentML xmlns:mzid="http://psidev.info/psi/pi/mzIdentML/1.2">
  <mzid:SpectrumIdentificationResult spectrumID="scan=7">
    <mzid:SpectrumIdentificationItem rank="1" passThreshold="false"/>
  </mzid:SpectrumIdentificationResult>
  <mzid:SpectrumIdentificationResult spectrumID="scan=7">
    <mzid:SpectrumIdentificationItem rank="1" passThreshold="true"/>
  </mzid:SpectrumIdentificationResult>
  <mzid:SpectrumIdentificationResult spectrumID="scan=8"/>
</mzid:MzIdentML>"#;
    let (ids, stats) = parse(input);

    assert_eq!(ids.len(), 2);
    assert!(ids.is_identified(7));
    assert!(!ids.is_identified(8));
    assert_eq!(stats.results, 3);
}

#[test]
fn test_truncated_document_is_an_error() {
    let input = r#"<MzIdentML><SpectrumIdentificationResult spectrumID="scan=1">
      <SpectrumIdentificationItem passThreshold="true"/>"#;
    let result = MzIdentMlReader::new(Cursor::new(input)).read_identifications();
    assert!(result.is_err());
}

#[test]
fn test_merge_prefers_best_passing_rank() {
    let mut id = Identification {
        passed: true,
        peptide: Some("AAA".to_string()),
        rank: Some(3),
    };
    id.merge(Identification {
        passed: false,
        peptide: None,
        rank: None,
    });
    assert_eq!(id.peptide.as_deref(), Some("AAA"));

    id.merge(Identification {
        passed: true,
        peptide: Some("BBB".to_string()),
        rank: Some(1),
    });
    assert!(id.passed);
    assert_eq!(id.peptide.as_deref(), Some("BBB"));
}
