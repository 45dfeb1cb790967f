//! Error types for the rfpscan-core library.

use thiserror::Error;

/// Main error type for the rfpscan library.
#[derive(Error, Debug)]
pub enum RfpError {
    /// Text could not be extracted from the document.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF container.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Terminal failure of the text extractor.
///
/// Raised only after both the PDF path and the plain text fallback have
/// been tried. No findings are produced for a run that ends here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// Neither a PDF nor decodable UTF-8 text.
    #[error("unable to extract text from document: {dropped} of {total} bytes are not valid UTF-8")]
    Undecodable { dropped: usize, total: usize },

    /// The document exceeds the configured size limit.
    #[error("document is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

/// Result type for the rfpscan library.
pub type Result<T> = std::result::Result<T, RfpError>;
