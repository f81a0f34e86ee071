/// Errors that can occur while annotating FASTA headers
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// I/O error reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Feature table could not be parsed
    #[error("Feature table parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required feature table column is absent
    #[error("Missing required feature table column: {0}")]
    MissingColumn(String),

    /// Ensembl header without `ID.GENE.REST` segments
    #[error("Unexpected Ensembl header format: {0}")]
    UnexpectedHeader(String),

    /// Non-Ensembl header with no earlier Ensembl ID to inherit
    #[error("No ENST/ENSMUST ID found before header: {0}")]
    NoEnsemblId(String),
}
