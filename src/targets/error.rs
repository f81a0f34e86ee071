/// Errors that can occur while loading a target list
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// I/O error reading the target file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Missing required column
    #[error("Target CSV must contain a '{0}' column")]
    MissingColumn(String),

    /// A numeric cell could not be parsed
    #[error("Invalid {column} value '{value}' on row {row}")]
    InvalidNumber {
        /// Column name
        column: String,
        /// Offending cell content
        value: String,
        /// 1-based data row
        row: usize,
    },

    /// Negative or non-finite tolerance
    #[error("Tolerance must be a non-negative number, got {value} on row {row}")]
    InvalidTolerance {
        /// Offending tolerance
        value: f64,
        /// 1-based data row
        row: usize,
    },
}
