//! Error types for the pdfquote-core library.

use thiserror::Error;

/// Main error type for the pdfquote library.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Quotation calculation error.
    #[error("quotation error: {0}")]
    Quotation(#[from] QuotationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF loading and text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The bytes are not a readable PDF structure.
    #[error("failed to parse PDF: {0}")]
    Malformed(String),

    /// The PDF is encrypted and the empty password did not open it.
    #[error("PDF is encrypted")]
    Encrypted,

    /// No document has been loaded into the extractor.
    #[error("no document loaded")]
    NotLoaded,

    /// A requested page does not exist.
    #[error("page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },

    /// The text engine failed on a page.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),
}

impl PdfError {
    /// Whether the document itself could not be read, as opposed to a failure
    /// while pulling text out of a readable document.
    pub fn is_malformed(&self) -> bool {
        matches!(self, PdfError::Malformed(_) | PdfError::Encrypted)
    }
}

/// Errors related to quotation calculation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuotationError {
    /// Item and price matches cannot be paired.
    #[error("found {items} item/quantity matches but {prices} price matches")]
    Mismatch { items: usize, prices: usize },

    /// An amount does not fit in the integer range.
    #[error("amount for item '{item}' overflows")]
    Overflow { item: String },
}

/// Result type for the pdfquote library.
pub type Result<T> = std::result::Result<T, QuoteError>;
