//! Regex patterns for quotation tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `name = 12`. Also matches unrelated `word = number` text such as
    // `page = 2`; pairing with prices is positional only. Digits are ASCII
    // only (`[0-9]`, not Unicode `\d`), so `apple = ٤` is not an item; names
    // still match any Unicode word character.
    pub static ref ITEM_QUANTITY: Regex = Regex::new(
        r"(\w+)\s*=\s*([0-9]+)"
    ).unwrap();

    // `price = Rs 10`, ASCII digits only
    pub static ref UNIT_PRICE: Regex = Regex::new(
        r"price\s*=\s*Rs\s*([0-9]+)"
    ).unwrap();
}
