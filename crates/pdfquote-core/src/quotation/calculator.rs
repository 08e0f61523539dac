//! Positional pairing of item quantities with unit prices.

use tracing::{debug, trace};

use super::patterns::{ITEM_QUANTITY, UNIT_PRICE};
use super::{LineItem, Quotation, Result};
use crate::error::QuotationError;

/// Quotation calculator.
///
/// Quantities and prices are matched in two independent passes and paired by
/// index. Nothing ties a price to the item it follows in the text.
pub struct QuotationCalculator;

impl QuotationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the quotation for `text`.
    pub fn calculate(&self, text: &str) -> Result<Quotation> {
        let items = find_items(text);
        let prices = find_prices(text);
        debug!("Found {} item matches and {} price matches", items.len(), prices.len());

        if items.len() != prices.len() {
            return Err(QuotationError::Mismatch {
                items: items.len(),
                prices: prices.len(),
            });
        }

        let mut quotation = Quotation::default();

        for ((name, quantity_text), unit_price_text) in items.into_iter().zip(prices) {
            let overflow = || QuotationError::Overflow { item: name.clone() };

            let quantity: u64 = quantity_text.parse().map_err(|_| overflow())?;
            let unit_price: u64 = unit_price_text.parse().map_err(|_| overflow())?;
            let line_total = quantity.checked_mul(unit_price).ok_or_else(overflow)?;
            quotation.total = quotation.total.checked_add(line_total).ok_or_else(overflow)?;

            trace!("{}: {} x {} = {}", name, quantity, unit_price, line_total);
            quotation.items.push(LineItem {
                name,
                quantity_text,
                unit_price_text,
                quantity,
                unit_price,
                line_total,
            });
        }

        Ok(quotation)
    }
}

impl Default for QuotationCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// All `name = quantity` matches in text order.
pub fn find_items(text: &str) -> Vec<(String, String)> {
    ITEM_QUANTITY
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// All `price = Rs N` values in text order.
pub fn find_prices(text: &str) -> Vec<String> {
    UNIT_PRICE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Compute the quotation for `text`.
pub fn calculate(text: &str) -> Result<Quotation> {
    QuotationCalculator::new().calculate(text)
}

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
