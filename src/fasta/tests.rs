use super::*;

const FEATURE_TABLE: &str = "# feature\tclass\tproduct_accession\tname\tsymbol\n\
CDS\twith_protein\tNP_000005.3\talpha-2-macroglobulin\tA2M\n\
CDS\twith_protein\tNP_000006.2\tarylamine N-acetyltransferase 2\tNAT2\n\
CDS\twith_protein\tNP_000006.2\tduplicate entry\tOTHER\n\
gene\tprotein_coding\t\t\tGENE1\n\
CDS\twith_protein\tXP_011520000.1\tuncharacterized \"quoted\" protein\t\n";

#[test]
fn test_read_feature_table() {
    let symbols = read_feature_table(FEATURE_TABLE.as_bytes()).unwrap();

    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols.get("NP_000005.3").map(String::as_str), Some("A2M"));
    assert_eq!(symbols.get("NP_000006.2").map(String::as_str), Some("NAT2"));
    assert!(!symbols.contains_key("XP_011520000.1"));
}

#[test]
fn test_missing_symbol_column() {
    let table = "# feature\tproduct_accession\nCDS\tNP_000005.3\n";
    let err = read_feature_table(table.as_bytes()).unwrap_err();
    assert!(matches!(err, AnnotateError::MissingColumn(ref c) if c == "symbol"));
}

#[test]
fn test_header_accession() {
    assert_eq!(header_accession(">NP_000005.3 alpha"), Some("NP_000005.3"));
    assert_eq!(header_accession(">NP_000005.3"), Some("NP_000005.3"));
    assert_eq!(header_accession(">"), None);
    assert_eq!(header_accession("MKWVTF"), None);
}

#[test]
fn test_annotate_fasta() {
    let symbols = read_feature_table(FEATURE_TABLE.as_bytes()).unwrap();
    let fasta = ">NP_000005.3 alpha-2-macroglobulin [Homo sapiens]\n\
                 MGKNKLLHPSLVLLLLVLLPTDASVSGKPQYMVLVPSLLHTETTEKGCVLLSYLNETVTV\n\
                 >NP_999999.1 unknown protein\r\n\
                 MKWVTFISLLLLFSSAYS\n\
                 >NP_000006.2\n\
                 MDIEAYLERIGYKKSRNKLDLETLTDILQHQIRAVPFENLNIHCGDAMDLGLEAIFDQVV";

    let mut output = Vec::new();
    let stats = annotate_fasta(fasta.as_bytes(), &mut output, &symbols).unwrap();

    assert_eq!(stats, AnnotationStats { records: 3, annotated: 2 });
    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines[0],
        ">NP_000005.3 alpha-2-macroglobulin [Homo sapiens] GN=A2M"
    );
    assert_eq!(lines[2], ">NP_999999.1 unknown protein");
    assert_eq!(lines[4], ">NP_000006.2 GN=NAT2");
    // Sequence lines pass through untouched, including a missing final newline
    assert!(output.ends_with("AIFDQVV"));
}

#[test]
fn test_annotate_empty_input() {
    let mut output = Vec::new();
    let stats = annotate_fasta(&b""[..], &mut output, &HashMap::new()).unwrap();
    assert_eq!(stats, AnnotationStats::default());
    assert!(output.is_empty());
}

#[test]
fn test_annotate_normalises_line_endings() {
    let symbols = read_feature_table(FEATURE_TABLE.as_bytes()).unwrap();
    let fasta = ">NP_000005.3 desc  \t\r\nMKW\r\nVTF\r\n";

    let mut output = Vec::new();
    annotate_fasta(fasta.as_bytes(), &mut output, &symbols).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        ">NP_000005.3 desc GN=A2M\nMKW\nVTF\n"
    );
}

#[test]
fn test_uniprot_headers() {
    let mut converter = UniProtHeaderConverter::default();

    assert_eq!(
        converter
            .convert(">ENST00000343518.POTEH.43096 JAUMIU010000140:8603-8709")
            .unwrap(),
        ">sp|ENST00000343518|POTEH_TABRA ENST00000343518 GN=POTEH"
    );
    assert_eq!(
        converter.convert(">TMEM129-like.CM061257:895302-901188").unwrap(),
        ">sp|ENST00000343518_2|TMEM129-like_TABRA ENST00000343518_2 GN=TMEM129-like"
    );
    assert_eq!(
        converter
            .convert(">ENST00000343518.POTEH.43096 second copy")
            .unwrap(),
        ">sp|ENST00000343518_3|POTEH_TABRA ENST00000343518_3 GN=POTEH"
    );
    assert_eq!(
        converter.convert(">ENSMUST00000100001.Actb.7").unwrap(),
        ">sp|ENSMUST00000100001|Actb_TABRA ENSMUST00000100001 GN=Actb"
    );
    assert_eq!(
        converter.stats(),
        HeaderConversionStats {
            records: 4,
            inherited: 1
        }
    );
}

#[test]
fn test_uniprot_header_errors() {
    let mut converter = UniProtHeaderConverter::new("MOUSE");
    assert!(matches!(
        converter.convert(">Orphan.CM061257:1-2"),
        Err(AnnotateError::NoEnsemblId(_))
    ));
    assert!(matches!(
        converter.convert(">ENST00000343518.POTEH"),
        Err(AnnotateError::UnexpectedHeader(_))
    ));
    assert!(matches!(
        converter.convert(">"),
        Err(AnnotateError::UnexpectedHeader(_))
    ));
}

#[test]
fn test_convert_fasta_headers_stream() {
    let fasta = ">ENST00000000001.GENEA.1 chr1:1-10\r\n  MKW  \r\n\n>GENEB-like.chr2:5-9\nVTF";
    let mut output = Vec::new();
    let stats = convert_fasta_headers(fasta.as_bytes(), &mut output, "HUMAN").unwrap();

    assert_eq!(stats.records, 2);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        ">sp|ENST00000000001|GENEA_HUMAN ENST00000000001 GN=GENEA\nMKW\n\n\
         >sp|ENST00000000001_2|GENEB-like_HUMAN ENST00000000001_2 GN=GENEB-like\nVTF\n"
    );
}
