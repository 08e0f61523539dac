//! WASM bindings for PDF text extraction and quotation calculation.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use pdfquote_core::quotation;
use pdfquote_core::{PageSelection, QuoteConfig, RenderModel, RenderOptions};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn log_errors(model: &RenderModel) {
    for notice in model.notices.iter().filter(|n| n.is_error()) {
        web_sys::console::warn_1(&JsValue::from_str(&notice.message));
    }
}

/// Run one render pass.
///
/// `data` is the uploaded PDF (or `undefined` when nothing is uploaded) and
/// `options` a `{ pages, show_item_breakdown, show_word_count }` object.
#[wasm_bindgen]
pub fn render(data: Option<Vec<u8>>, options: JsValue) -> Result<JsValue, JsValue> {
    let options: RenderOptions = if options.is_undefined() || options.is_null() {
        RenderOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    let model = pdfquote_core::render(data.as_deref(), &options, &QuoteConfig::default());
    log_errors(&model);
    to_js(&model)
}

/// Read a `File` from an `<input type="file">` into bytes for
/// [`QuoteScreen::upload`].
#[wasm_bindgen]
pub async fn read_upload(file: web_sys::File) -> Result<Uint8Array, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer))
}

/// Read a `File` and run one render pass over it.
#[wasm_bindgen]
pub async fn render_file(file: web_sys::File, options: JsValue) -> Result<JsValue, JsValue> {
    let data = read_upload(file).await?.to_vec();
    render(Some(data), options)
}

/// Compute a quotation from already extracted text.
#[wasm_bindgen]
pub fn calculate_quotation(text: &str) -> Result<JsValue, JsValue> {
    let quotation = quotation::calculate(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&quotation)
}

/// Number of whitespace-separated tokens in `text`.
#[wasm_bindgen]
pub fn word_count(text: &str) -> usize {
    quotation::word_count(text)
}

/// The single-screen utility for browser use.
///
/// Holds the current upload and options; every setter runs one render pass
/// and returns the new model.
#[wasm_bindgen]
pub struct QuoteScreen {
    document: Option<Vec<u8>>,
    options: RenderOptions,
    config: QuoteConfig,
    model: RenderModel,
}

#[wasm_bindgen]
impl QuoteScreen {
    /// Create an empty screen.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = QuoteConfig::default();
        let options = config.initial_options();
        let model = pdfquote_core::render(None, &options, &config);
        Self {
            document: None,
            options,
            config,
            model,
        }
    }

    /// Replace the uploaded document with raw bytes.
    #[wasm_bindgen]
    pub fn upload(&mut self, data: Vec<u8>) -> Result<JsValue, JsValue> {
        self.document = Some(data);
        self.rerender()
    }

    /// Remove the uploaded document.
    #[wasm_bindgen]
    pub fn clear(&mut self) -> Result<JsValue, JsValue> {
        self.document = None;
        self.rerender()
    }

    /// Extract every page.
    #[wasm_bindgen]
    pub fn set_all_pages(&mut self) -> Result<JsValue, JsValue> {
        self.options = self.options.with_pages(PageSelection::All);
        self.rerender()
    }

    /// Extract an inclusive 1-indexed page range.
    #[wasm_bindgen]
    pub fn set_page_range(&mut self, start: u32, end: u32) -> Result<JsValue, JsValue> {
        if start == 0 || end == 0 {
            return Err(JsValue::from_str("page numbers start at 1"));
        }
        self.options = self.options.with_pages(PageSelection::range(start, end));
        self.rerender()
    }

    /// Toggle the per-item breakdown.
    #[wasm_bindgen]
    pub fn set_show_item_breakdown(&mut self, show: bool) -> Result<JsValue, JsValue> {
        self.options = self.options.with_item_breakdown(show);
        self.rerender()
    }

    /// Toggle the word count.
    #[wasm_bindgen]
    pub fn set_show_word_count(&mut self, show: bool) -> Result<JsValue, JsValue> {
        self.options = self.options.with_word_count(show);
        self.rerender()
    }

    /// The last render model.
    #[wasm_bindgen]
    pub fn model(&self) -> Result<JsValue, JsValue> {
        to_js(&self.model)
    }

    /// Contents and file name for the download button, if text was extracted.
    #[wasm_bindgen]
    pub fn download(&self) -> Result<JsValue, JsValue> {
        to_js(&self.model.download)
    }
}

impl QuoteScreen {
    fn rerender(&mut self) -> Result<JsValue, JsValue> {
        self.model = pdfquote_core::render(self.document.as_deref(), &self.options, &self.config);
        log_errors(&self.model);
        to_js(&self.model)
    }
}

impl Default for QuoteScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_word_count() {
        assert_eq!(word_count("a b  c"), 3);
    }

    #[wasm_bindgen_test]
    fn test_calculate_quotation() {
        assert!(calculate_quotation("apple = 4\nprice = Rs 10").is_ok());
        assert!(calculate_quotation("x = 3\nprice = Rs 9\npage = 2").is_err());
    }

    #[wasm_bindgen_test]
    fn test_screen_without_upload() {
        let screen = QuoteScreen::new();
        assert!(screen.model.extracted_text.is_none());
        assert_eq!(screen.model.notices.len(), 1);
    }

    #[wasm_bindgen_test]
    fn test_screen_survives_corrupt_upload() {
        let mut screen = QuoteScreen::new();
        assert!(screen.upload(b"not a pdf".to_vec()).is_ok());
        assert!(screen.model.has_error());
        assert!(screen.set_show_word_count(true).is_ok());
        assert!(screen.clear().is_ok());
        assert!(!screen.model.has_error());
    }
}
