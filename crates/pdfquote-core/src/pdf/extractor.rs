//! PDF text extraction using lopdf and pdf-extract.

use std::ops::Range;

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, Result, TextEngine};
use crate::error::PdfError;

/// PDF text extractor backed by lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    engine: TextEngine,
    decrypt_empty_password: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor using the lopdf engine.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            engine: TextEngine::default(),
            decrypt_empty_password: true,
        }
    }

    /// Select the text engine.
    pub fn with_engine(mut self, engine: TextEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Try the empty password on encrypted documents.
    pub fn with_empty_password_decryption(mut self, enabled: bool) -> Self {
        self.decrypt_empty_password = enabled;
        self
    }

    /// The engine in use.
    pub fn engine(&self) -> TextEngine {
        self.engine
    }

    fn document(&self) -> Result<&Document> {
        self.document.as_ref().ok_or(PdfError::NotLoaded)
    }

    fn out_of_range(&self, index: usize) -> PdfError {
        PdfError::PageOutOfRange {
            page: u32::try_from(index + 1).unwrap_or(u32::MAX),
            page_count: self.page_count(),
        }
    }

    fn lopdf_page_text(&self, index: usize) -> Result<String> {
        let doc = self.document()?;
        let page_number = u32::try_from(index + 1).map_err(|_| self.out_of_range(index))?;

        if !doc.get_pages().contains_key(&page_number) {
            return Err(self.out_of_range(index));
        }

        let text = doc
            .extract_text(&[page_number])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page_number, e)))?;
        trace!("Page {}: {} chars", page_number, text.len());
        Ok(text)
    }

    #[cfg(feature = "native")]
    fn pdf_extract_pages(&self) -> Result<Vec<String>> {
        self.document()?;
        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    #[cfg(not(feature = "native"))]
    fn pdf_extract_pages(&self) -> Result<Vec<String>> {
        Err(PdfError::TextExtraction(
            "pdf-extract engine is not available in this build".to_string(),
        ))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Malformed(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reparses the bytes, so it needs the decrypted form
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Malformed(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        debug!("Loaded PDF with {} pages", doc.get_pages().len());
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, index: usize) -> Result<String> {
        match self.engine {
            TextEngine::Lopdf => self.lopdf_page_text(index),
            TextEngine::PdfExtract => self
                .pdf_extract_pages()?
                .into_iter()
                .nth(index)
                .ok_or_else(|| self.out_of_range(index)),
        }
    }

    fn extract_range(&self, range: Range<usize>) -> Result<String> {
        debug!("Extracting pages {:?} with {:?}", range, self.engine);
        let mut text = String::new();

        match self.engine {
            TextEngine::Lopdf => {
                for index in range {
                    text.push_str(&self.lopdf_page_text(index)?);
                }
            }
            TextEngine::PdfExtract => {
                if range.is_empty() {
                    return Ok(text);
                }
                let pages = self.pdf_extract_pages()?;
                for index in range {
                    let page = pages.get(index).ok_or_else(|| self.out_of_range(index))?;
                    text.push_str(page);
                }
            }
        }

        Ok(text)
    }
}
