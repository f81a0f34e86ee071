/// Errors that can occur while reading or writing scan tables
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error on the table file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required column missing from an input table
    #[error("Scan table is missing required column: {0}")]
    MissingColumn(String),

    /// Row has a different number of cells than the header
    #[error("Row for scan {scan_number} has {actual} target cells, expected {expected}")]
    TargetCountMismatch {
        /// Scan being written
        scan_number: u64,
        /// Target columns in the header
        expected: usize,
        /// Target results on the row
        actual: usize,
    },
}
