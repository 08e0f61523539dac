//! Quotation calculation from extracted text.

mod calculator;
pub mod patterns;

pub use calculator::{QuotationCalculator, calculate, find_items, find_prices, word_count};

use serde::{Deserialize, Serialize};

use crate::error::QuotationError;

/// Result type for quotation operations.
pub type Result<T> = std::result::Result<T, QuotationError>;

/// One priced line of a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name as matched.
    pub name: String,
    /// Quantity as it appears in the text.
    pub quantity_text: String,
    /// Unit price as it appears in the text.
    pub unit_price_text: String,
    pub quantity: u64,
    pub unit_price: u64,
    /// `quantity * unit_price`.
    pub line_total: u64,
}

impl LineItem {
    /// Item name with the first character upper-cased and the rest lower-cased.
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }
}

/// A computed quotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// Line items in match order.
    pub items: Vec<LineItem>,
    /// Sum of all line totals.
    pub total: u64,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
