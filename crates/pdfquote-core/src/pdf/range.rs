//! Page range selection.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Pages selected for extraction.
///
/// Bounds are 1-indexed and inclusive, exactly as a user types them. They are
/// not checked against the document: a page past the end surfaces as an error
/// when the extractor reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PageSelection {
    /// Every page in the document.
    #[default]
    All,
    /// An explicit inclusive span (1-indexed).
    Range { start: u32, end: u32 },
}

impl PageSelection {
    /// Create an explicit range selection.
    pub fn range(start: u32, end: u32) -> Self {
        PageSelection::Range { start, end }
    }

    /// Resolve to a zero-indexed half-open range over the page list.
    ///
    /// `start > end` resolves to an empty range.
    pub fn resolve(&self, page_count: u32) -> Range<usize> {
        match *self {
            PageSelection::All => 0..page_count as usize,
            PageSelection::Range { start, end } => {
                let start = start.saturating_sub(1) as usize;
                let end = end as usize;
                start..end.max(start)
            }
        }
    }

    /// Parse a selection such as `all`, `3` or `2-5`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let (start, end) = match s.split_once('-') {
            Some((start, end)) => (start, end),
            None => (s, s),
        };
        let start = parse_page(start, "start")?;
        let end = parse_page(end, "end")?;
        Ok(PageSelection::Range { start, end })
    }
}

fn parse_page(s: &str, which: &str) -> Result<u32, String> {
    let page: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid {} page: '{}'", which, s.trim()))?;
    if page == 0 {
        return Err(format!("{} page must be at least 1", which));
    }
    Ok(page)
}

impl fmt::Display for PageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSelection::All => write!(f, "all pages"),
            PageSelection::Range { start, end } => write!(f, "pages {}-{}", start, end),
        }
    }
}
