//! Core library for PDF text extraction and quotation calculation.
//!
//! This crate provides:
//! - PDF loading and page-range text extraction (lopdf, pdf-extract)
//! - Quotation calculation from `name = qty` and `price = Rs N` tokens
//! - A single render pass turning a document and options into a screen model

pub mod config;
pub mod error;
pub mod pdf;
pub mod quotation;
pub mod render;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

pub use config::QuoteConfig;
pub use error::{PdfError, QuotationError, QuoteError, Result};
pub use pdf::{PageSelection, PdfExtractor, PdfProcessor, TextEngine};
pub use quotation::{LineItem, Quotation, QuotationCalculator};
pub use render::{Download, Notice, NoticeKind, RenderModel, RenderOptions, Severity, render};
