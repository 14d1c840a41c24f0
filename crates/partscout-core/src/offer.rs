//! Domain types for extracted offers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A part search as supplied by the caller. Immutable for the duration of
/// one `extract` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term (part name, OEM reference, ...).
    pub term: String,
    /// Optional category filter. Only honoured by stores whose search URL
    /// template carries a `{category}` placeholder.
    pub category: Option<String>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            category: None,
        }
    }

    #[must_use]
    pub fn with_category(term: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            category: Some(category.into()),
        }
    }
}

/// One normalized product listing at one store.
///
/// Every offer names exactly one source store; offers from different stores
/// are never merged into one record. A successful offer always carries a
/// positive price and a non-empty title — items that cannot satisfy that
/// are dropped during assembly or, for browser-side item faults, replaced
/// by an [`Offer::error_placeholder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub store_id: i64,
    pub store_name: String,
    pub title: String,
    pub price: Decimal,
    pub available: bool,
    pub product_url: String,
    pub image_url: Option<String>,
    /// Pre-discount price, set only when the source reports one above the
    /// current price.
    pub original_price: Option<Decimal>,
    /// Seller reputation on a 1–5 scale, where the source exposes one.
    pub seller_rating: Option<u8>,
    /// Free-text shipping hint (e.g. free shipping), where the source
    /// exposes one.
    pub shipping_note: Option<String>,
    pub scraped_at: DateTime<Utc>,
    pub has_error: bool,
    pub error_message: Option<String>,
}

impl Offer {
    /// Placeholder emitted when a single candidate item failed during
    /// extraction but the batch continued. Carries no usable price;
    /// consumers filter on `has_error`.
    #[must_use]
    pub fn error_placeholder(
        store_id: i64,
        store_name: &str,
        message: impl Into<String>,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            store_id,
            store_name: store_name.to_owned(),
            title: String::new(),
            price: Decimal::ZERO,
            available: false,
            product_url: String::new(),
            image_url: None,
            original_price: None,
            seller_rating: None,
            shipping_note: None,
            scraped_at,
            has_error: true,
            error_message: Some(message.into()),
        }
    }

    /// True when the offer satisfies the success invariants: positive
    /// price, non-empty title, no error tag.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.has_error && !self.title.is_empty() && self.price > Decimal::ZERO
    }
}

/// Why a single candidate item did not become a successful offer.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("missing title")]
    MissingTitle,

    #[error("no usable price (raw: {raw:?})")]
    UnusablePrice { raw: Option<String> },

    #[error("missing product link")]
    MissingProductUrl,

    /// A live-DOM query failed mid-item (browser adapter only). Unlike the
    /// parse variants above, this is surfaced as an error-tagged
    /// placeholder rather than silently dropped.
    #[error("DOM query failed: {0}")]
    Dom(String),
}
