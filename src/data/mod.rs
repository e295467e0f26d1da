//! Parsed snapshot data: regions, countries and their stock rows.

pub mod normalizer;

use crate::signals::{classify, Classification};
use rust_decimal::Decimal;

pub use normalizer::{read_country_file, read_rows};

/// Complete open/high/low/close quadruple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ohlc {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Ohlc {
    pub fn classify(&self) -> Classification {
        classify(self.open, self.high, self.low, self.close)
    }
}

/// One CSV record after normalization.
///
/// Text fields default to empty; price fields are `None` when the column is
/// missing or the cell does not parse, never zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockRow {
    pub symbol: String,
    pub description: String,
    pub exchange: String,
    pub sector: String,
    pub industry: String,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
}

impl StockRow {
    /// Description, falling back to the symbol
    pub fn display_name(&self) -> &str {
        if self.description.is_empty() {
            &self.symbol
        } else {
            &self.description
        }
    }

    /// All four prices, or `None` if any is absent
    pub fn ohlc(&self) -> Option<Ohlc> {
        Some(Ohlc {
            open: self.open?,
            high: self.high?,
            low: self.low?,
            close: self.close?,
        })
    }
}

/// One country CSV under a region
#[derive(Debug, Clone, PartialEq)]
pub struct CountryData {
    pub name: String,
    pub rows: Vec<StockRow>,
}

impl CountryData {
    /// Display name from a file stem: dashes become spaces, then title case
    pub fn display_name(stem: &str) -> String {
        title_case(&stem.replace('-', " "))
    }
}

/// One region directory of the snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct RegionData {
    pub name: String,
    pub countries: Vec<CountryData>,
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
