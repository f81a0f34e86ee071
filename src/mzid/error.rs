/// Errors that can occur during mzIdentML parsing
#[derive(Debug, thiserror::Error)]
pub enum MzIdError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid mzIdentML document structure
    #[error("Invalid mzIdentML structure: {0}")]
    InvalidStructure(String),

    /// UTF-8 encoding error in text content
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),
}
