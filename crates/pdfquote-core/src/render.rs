//! One render pass: document and options in, everything the screen shows out.
//!
//! [`render`] is the whole request/response cycle. It is called once per user
//! action with an immutable [`RenderOptions`] and never fails: every error is
//! turned into a [`Notice`] on the returned [`RenderModel`] so the caller can
//! keep accepting input.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::QuoteConfig;
use crate::error::{PdfError, QuotationError};
use crate::pdf::{PageSelection, PdfExtractor, PdfProcessor};
use crate::quotation::{LineItem, Quotation, QuotationCalculator, word_count};

/// Shown when no document has been provided.
pub const NO_FILE_MESSAGE: &str = "Please upload a PDF file to extract text.";
/// Shown when the document cannot be parsed.
pub const MALFORMED_MESSAGE: &str =
    "Error reading the PDF file. It might be corrupted or improperly formatted.";
/// Shown when item and price counts differ.
pub const MISMATCH_MESSAGE: &str = "Mismatch between the number of items/quantities and prices.";

/// The user's current choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Pages to extract.
    pub pages: PageSelection,
    /// Show per-item calculations.
    pub show_item_breakdown: bool,
    /// Show the word count.
    pub show_word_count: bool,
}

impl RenderOptions {
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_item_breakdown(mut self, show: bool) -> Self {
        self.show_item_breakdown = show;
        self
    }

    pub fn with_word_count(mut self, show: bool) -> Self {
        self.show_word_count = show;
        self
    }
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

/// What a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Nothing uploaded yet.
    NoFileProvided,
    /// The bytes are not a readable PDF.
    MalformedDocument,
    /// Any other failure while pulling text out of the document.
    ExtractionFailure,
    /// Item and price counts differ.
    QuotationMismatch,
    /// An amount did not fit the integer range.
    QuotationOverflow,
}

/// An inline message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    fn info(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Info,
            message: message.into(),
        }
    }

    fn error(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn from_pdf_error(err: &PdfError) -> Self {
        if err.is_malformed() {
            Notice::error(NoticeKind::MalformedDocument, MALFORMED_MESSAGE)
        } else {
            Notice::error(
                NoticeKind::ExtractionFailure,
                format!("An unexpected error occurred: {}", err),
            )
        }
    }

    fn from_quotation_error(err: &QuotationError) -> Self {
        match err {
            QuotationError::Mismatch { .. } => {
                Notice::error(NoticeKind::QuotationMismatch, MISMATCH_MESSAGE)
            }
            QuotationError::Overflow { .. } => Notice::error(
                NoticeKind::QuotationOverflow,
                format!("Quotation total is too large to compute: {}", err),
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// The extracted text offered as a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    pub file_name: String,
    /// Identical to the extracted text.
    pub contents: String,
}

/// Everything one render pass produces, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderModel {
    /// Pages in the loaded document.
    pub page_count: Option<u32>,
    pub extracted_text: Option<String>,
    pub download: Option<Download>,
    pub quotation: Option<Quotation>,
    /// Formatted total, present with `quotation`.
    pub total_line: Option<String>,
    /// Formatted per-item lines, only when requested.
    pub breakdown: Vec<String>,
    /// Only when requested and text was extracted.
    pub word_count: Option<usize>,
    pub notices: Vec<Notice>,
}

impl RenderModel {
    /// Whether the pass ended with an error notice.
    pub fn has_error(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }
}

/// Run one render pass.
pub fn render(document: Option<&[u8]>, options: &RenderOptions, config: &QuoteConfig) -> RenderModel {
    let mut model = RenderModel::default();

    let Some(data) = document else {
        model.notices.push(Notice::info(NoticeKind::NoFileProvided, NO_FILE_MESSAGE));
        return model;
    };

    let mut extractor = PdfExtractor::new()
        .with_engine(config.pdf.engine)
        .with_empty_password_decryption(config.pdf.decrypt_empty_password);

    let text = match extract(&mut extractor, data, options.pages, &mut model) {
        Ok(text) => text,
        Err(err) => {
            warn!("Extraction failed: {}", err);
            model.notices.push(Notice::from_pdf_error(&err));
            return model;
        }
    };

    model.download = Some(Download {
        file_name: config.output.download_file_name.clone(),
        contents: text.clone(),
    });

    match QuotationCalculator::new().calculate(&text) {
        Ok(quotation) => {
            info!("Quotation: {} items, total {}", quotation.items.len(), quotation.total);
            model.total_line = Some(format_total(quotation.total));
            if options.show_item_breakdown {
                model.breakdown = quotation.items.iter().map(format_line_item).collect();
            }
            model.quotation = Some(quotation);
        }
        Err(err) => {
            warn!("Quotation skipped: {}", err);
            model.notices.push(Notice::from_quotation_error(&err));
        }
    }

    if options.show_word_count {
        model.word_count = Some(word_count(&text));
    }

    model.extracted_text = Some(text);
    model
}

fn extract(
    extractor: &mut PdfExtractor,
    data: &[u8],
    pages: PageSelection,
    model: &mut RenderModel,
) -> Result<String, PdfError> {
    extractor.load(data)?;
    let page_count = extractor.page_count();
    model.page_count = Some(page_count);

    let range = pages.resolve(page_count);
    debug!("Rendering {} of {} -> {:?}", pages, page_count, range);
    extractor.extract_range(range)
}

/// `Total Quotation: Rs 50`.
pub fn format_total(total: u64) -> String {
    format!("Total Quotation: Rs {}", total)
}

/// `Apple: 4 units at Rs 10 each, Total: Rs 40`.
pub fn format_line_item(item: &LineItem) -> String {
    format!(
        "{}: {} units at Rs {} each, Total: Rs {}",
        item.display_name(),
        item.quantity_text,
        item.unit_price_text,
        item.line_total
    )
}

/// `Word Count: 14`.
pub fn format_word_count(count: usize) -> String {
    format!("Word Count: {}", count)
}
