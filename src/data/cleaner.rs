//! Data Cleaner Module
//! Turns raw CSV rows into a Dataset: price coercion, threshold, null filling.

use serde::Deserialize;
use thiserror::Error;

use super::loader::LoaderError;
use super::model::{Dataset, Listing, MISSING_CATEGORY};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("empty price")]
    Empty,
    #[error("price is not a number: {0:?}")]
    NotANumber(String),
    #[error("price is negative: {0}")]
    Negative(f64),
}

/// What to do with a price cell that cannot be coerced to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePolicy {
    /// Drop the row and report a data-quality warning.
    #[default]
    Drop,
    /// Keep the row with a price of zero.
    Zero,
    /// Fail the whole load.
    Reject,
}

/// Settings applied while cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleaningOptions {
    /// Rows priced at or above this are discarded.
    pub max_price: f64,
    pub price_policy: PricePolicy,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            max_price: 500.0,
            price_policy: PricePolicy::Drop,
        }
    }
}

/// A row as read from the source, before cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub price: Option<String>,
    pub neighbourhood: Option<String>,
    pub room_type: Option<String>,
    pub beds: Option<f64>,
    pub bathrooms: Option<f64>,
    pub number_of_reviews: Option<f64>,
    pub host_is_superhost: Option<String>,
}

/// Cleaned dataset plus row accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanReport {
    pub dataset: Dataset,
    pub rows_read: usize,
    pub missing_price: usize,
    pub unparseable_price: usize,
    pub over_threshold: usize,
}

/// Strip the currency symbol and thousands separators, then parse.
pub fn parse_price(text: &str) -> Result<f64, PriceError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(PriceError::Empty);
    }

    let price: f64 = cleaned
        .parse()
        .map_err(|_| PriceError::NotANumber(text.to_string()))?;

    if !price.is_finite() {
        return Err(PriceError::NotANumber(text.to_string()));
    }
    if price < 0.0 {
        return Err(PriceError::Negative(price));
    }

    Ok(price)
}

/// Interpret a boolean-like cell (`t`/`f`, `true`/`false`, `1`/`0`, `yes`/`no`).
pub fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "1" | "yes" | "y" => Some(true),
        "f" | "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn category(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING_CATEGORY.to_string())
}

/// 1-based CSV line of a data row; the header is line 1.
fn csv_line(row: usize) -> usize {
    row + 2
}

fn fill_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Clean raw rows into a Dataset.
///
/// Rows without a price are dropped; unparseable prices follow
/// `options.price_policy`; rows priced at or above `options.max_price` are
/// dropped; missing beds and bathrooms become zero.
///
/// `rows` are in file order, so row `i` sits on CSV line `i + 2`.
pub fn clean(
    rows: Vec<RawListing>,
    has_superhost: bool,
    options: &CleaningOptions,
) -> Result<CleanReport, LoaderError> {
    let rows_read = rows.len();
    let mut missing_price = 0;
    let mut unparseable_price = 0;
    let mut over_threshold = 0;
    let mut listings = Vec::with_capacity(rows_read);

    for (row, raw) in rows.into_iter().enumerate() {
        let Some(price_text) = raw.price else {
            missing_price += 1;
            continue;
        };

        let price = match parse_price(&price_text) {
            Ok(price) => price,
            Err(err) => match options.price_policy {
                PricePolicy::Drop => {
                    log::debug!("Line {}: dropping listing, {err}", csv_line(row));
                    unparseable_price += 1;
                    continue;
                }
                PricePolicy::Zero => {
                    unparseable_price += 1;
                    0.0
                }
                PricePolicy::Reject => {
                    return Err(LoaderError::UnparseablePrice {
                        line: csv_line(row),
                        value: price_text,
                    });
                }
            },
        };

        if price >= options.max_price {
            over_threshold += 1;
            continue;
        }

        listings.push(Listing {
            price,
            neighbourhood: category(raw.neighbourhood),
            room_type: category(raw.room_type),
            beds: fill_zero(raw.beds),
            bathrooms: fill_zero(raw.bathrooms),
            number_of_reviews: raw.number_of_reviews.filter(|v| v.is_finite()),
            host_is_superhost: raw.host_is_superhost.as_deref().and_then(parse_flag),
        });
    }

    if unparseable_price > 0 {
        match options.price_policy {
            PricePolicy::Zero => log::warn!(
                "{unparseable_price} listing(s) had an unparseable price and were priced at 0"
            ),
            _ => log::warn!(
                "{unparseable_price} listing(s) dropped because their price could not be parsed"
            ),
        }
    }

    Ok(CleanReport {
        dataset: Dataset::new(listings, has_superhost)?,
        rows_read,
        missing_price,
        unparseable_price,
        over_threshold,
    })
}
