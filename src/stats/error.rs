/// Errors that can occur while producing a summary report
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Scan table could not be read
    #[error("Table error: {0}")]
    TableError(#[from] crate::table::TableError),

    /// I/O error writing the report
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
