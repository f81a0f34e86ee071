/// Errors that can occur while comparing peptide lists
#[derive(Debug, thiserror::Error)]
pub enum OverlapError {
    /// I/O error reading a list
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Fewer than two lists to compare
    #[error("At least two peptide lists are needed, got {0}")]
    TooFewLists(usize),

    /// More lists than the combination search supports
    #[error("Too many peptide lists: {count} (at most {max})")]
    TooManyLists {
        /// Lists given
        count: usize,
        /// Largest supported number of lists
        max: usize,
    },
}
