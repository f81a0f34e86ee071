/// Errors that can occur during MGF parsing
#[derive(Debug, thiserror::Error)]
pub enum MgfError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A line could not be decoded as UTF-8
    #[error("Invalid UTF-8 on line {line}")]
    InvalidUtf8 {
        /// 1-based line number
        line: usize,
    },
}
