//! Configuration structures for extraction and display.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::pdf::{PageSelection, TextEngine};
use crate::render::RenderOptions;

/// Default name of the downloadable text artifact.
pub const DEFAULT_DOWNLOAD_FILE_NAME: &str = "extracted_text.txt";

/// Main configuration for pdfquote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Default display toggles.
    pub display: DisplayConfig,

    /// Output artifact configuration.
    pub output: OutputConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Text extraction engine.
    pub engine: TextEngine,

    /// Try the empty password on encrypted documents.
    pub decrypt_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            engine: TextEngine::Lopdf,
            decrypt_empty_password: true,
        }
    }
}

/// Initial state of the screen's toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Extract every page unless a range is given.
    pub all_pages: bool,

    /// Show per-item calculations.
    pub show_item_breakdown: bool,

    /// Show the word count.
    pub show_word_count: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            all_pages: true,
            show_item_breakdown: false,
            show_word_count: false,
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name offered for the extracted text download.
    pub download_file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_file_name: DEFAULT_DOWNLOAD_FILE_NAME.to_string(),
        }
    }
}

impl QuoteConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| QuoteError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| QuoteError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Screen options before the user touches any control.
    ///
    /// With `all_pages` off the range starts at page 1..1, like a fresh pair of
    /// number inputs.
    pub fn initial_options(&self) -> RenderOptions {
        let pages = if self.display.all_pages {
            PageSelection::All
        } else {
            PageSelection::range(1, 1)
        };
        RenderOptions {
            pages,
            show_item_breakdown: self.display.show_item_breakdown,
            show_word_count: self.display.show_word_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = QuoteConfig::default();
        assert_eq!(config.pdf.engine, TextEngine::Lopdf);
        assert_eq!(config.output.download_file_name, "extracted_text.txt");
        assert_eq!(config.initial_options(), RenderOptions::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"display": {"show_word_count": true}}"#).unwrap();

        let config = QuoteConfig::from_file(&path).unwrap();
        assert!(config.display.all_pages);
        assert!(config.display.show_word_count);
        assert_eq!(config.pdf, PdfConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = QuoteConfig::default();
        config.pdf.engine = TextEngine::PdfExtract;
        config.display.all_pages = false;
        config.save(&path).unwrap();

        let reloaded = QuoteConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.initial_options().pages, PageSelection::range(1, 1));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(QuoteConfig::from_file(&path), Err(QuoteError::Config(_))));
    }
}
