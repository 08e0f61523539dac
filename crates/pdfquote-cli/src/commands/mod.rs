//! Subcommands and the pieces they share.

pub mod batch;
pub mod config;
pub mod interactive;
pub mod process;
pub mod screen;

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use pdfquote_core::{PageSelection, QuoteConfig, RenderOptions};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pdfquote")
        .join("config.json")
}

/// Load configuration from an explicit path, else the default path if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<QuoteConfig> {
    if let Some(path) = config_path {
        return Ok(QuoteConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config at {}", path.display());
        Ok(QuoteConfig::from_file(&path)?)
    } else {
        Ok(QuoteConfig::default())
    }
}

/// Page range and display toggles shared by `process` and `batch`.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Pages to extract: "all", "N" or "START-END" (1-indexed, inclusive)
    #[arg(short, long, conflicts_with_all = ["start", "end", "all_pages"])]
    pages: Option<String>,

    /// First page to extract
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), requires = "end")]
    start: Option<u32>,

    /// Last page to extract
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), requires = "start")]
    end: Option<u32>,

    /// Extract text from all pages
    #[arg(long, conflicts_with_all = ["start", "end"])]
    all_pages: bool,

    /// Show individual item calculations
    #[arg(long)]
    breakdown: bool,

    /// Show word count
    #[arg(long)]
    word_count: bool,
}

impl OptionArgs {
    /// Combine flags with the configured defaults.
    pub fn to_options(&self, config: &QuoteConfig) -> anyhow::Result<RenderOptions> {
        let mut options = config.initial_options();

        if let Some(pages) = &self.pages {
            options.pages = PageSelection::parse(pages).map_err(|e| anyhow::anyhow!(e))?;
        } else if let (Some(start), Some(end)) = (self.start, self.end) {
            options.pages = PageSelection::range(start, end);
        } else if self.all_pages {
            options.pages = PageSelection::All;
        }

        if self.breakdown {
            options.show_item_breakdown = true;
        }
        if self.word_count {
            options.show_word_count = true;
        }

        Ok(options)
    }
}
