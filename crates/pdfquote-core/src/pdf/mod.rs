//! PDF processing module.

mod extractor;
mod range;

pub use extractor::PdfExtractor;
pub use range::PageSelection;

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Backend used to turn page content streams into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEngine {
    /// lopdf's per-page text extraction.
    #[default]
    Lopdf,
    /// pdf-extract's layout-aware extraction (native builds only).
    PdfExtract,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from a single page (zero-indexed).
    fn extract_page_text(&self, index: usize) -> Result<String>;

    /// Extract text from a zero-indexed half-open page range, concatenated in
    /// page order with no separator.
    ///
    /// Pages are visited in order and the first missing page aborts with
    /// [`PdfError::PageOutOfRange`].
    fn extract_range(&self, range: Range<usize>) -> Result<String> {
        let mut text = String::new();
        for index in range {
            text.push_str(&self.extract_page_text(index)?);
        }
        Ok(text)
    }
}
