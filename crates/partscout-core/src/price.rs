//! Locale-aware price normalization.
//!
//! Raw price text from storefronts mixes currency symbols, grouping
//! separators and assorted noise (`"$ 12.990 c/u"`, `"CLP 1.250.000"`).
//! The scan below keeps digits, drops the configured thousands separator
//! and canonicalizes the configured decimal separator; everything else is
//! treated as noise.

use rust_decimal::Decimal;

use crate::stores::PriceFormat;

/// Turns a raw scraped price string into a decimal amount.
///
/// Never fails: any text that does not yield a parseable number comes back
/// as `Decimal::ZERO` with a debug log. Callers treat a non-positive price
/// as "no usable price" and drop the item.
#[must_use]
pub fn parse_price(raw: &str, format: &PriceFormat) -> Decimal {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == format.decimal_separator {
            cleaned.push('.');
        }
        // The thousands separator is grouping only; currency tokens,
        // letters and whitespace are noise. All of them are dropped.
    }

    if cleaned.is_empty() {
        tracing::debug!(raw, "price text yielded no digits");
        return Decimal::ZERO;
    }

    match cleaned.parse::<Decimal>() {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(raw, cleaned, %error, "unparsable price text");
            Decimal::ZERO
        }
    }
}
