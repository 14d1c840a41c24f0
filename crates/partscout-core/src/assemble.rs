//! Final validation and shaping of extracted fields into an [`Offer`].
//!
//! The assembler is the single place where the success invariants are
//! enforced; HTML and browser adapters both feed their raw field bundles
//! through it so per-item failure handling stays uniform.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::availability::classify_availability;
use crate::offer::{ItemError, Offer};
use crate::price::parse_price;
use crate::stores::StoreConfig;
use crate::urlnorm::resolve_url;

/// Raw field bundle pulled out of one candidate item node, before any
/// normalization. Ephemeral — lives only within a single adapter call.
#[derive(Debug, Default, Clone)]
pub struct RawItem {
    pub title: Option<String>,
    pub price_text: Option<String>,
    pub product_url: Option<String>,
    pub image_url: Option<String>,
    pub stock_text: Option<String>,
}

/// Normalizes one raw item into an [`Offer`].
///
/// Runs the locale price parser, URL normalizer and availability
/// classifier, then enforces the invariants: a successful offer has a
/// non-empty title, a positive price and a product link. A missing image
/// or stock text is not an error — those fields simply stay `None` /
/// default-open.
///
/// # Errors
///
/// - [`ItemError::MissingTitle`] when no title was extracted.
/// - [`ItemError::UnusablePrice`] when the price text is absent or does
///   not parse to a positive amount.
/// - [`ItemError::MissingProductUrl`] when no product link was extracted.
pub fn assemble_offer(
    store_id: i64,
    config: &StoreConfig,
    item: RawItem,
    scraped_at: DateTime<Utc>,
) -> Result<Offer, ItemError> {
    let title = item
        .title
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or(ItemError::MissingTitle)?;

    let price = item
        .price_text
        .as_deref()
        .map_or(Decimal::ZERO, |p| parse_price(p, &config.price_format));
    if price <= Decimal::ZERO {
        return Err(ItemError::UnusablePrice {
            raw: item.price_text,
        });
    }

    let product_url = item
        .product_url
        .map(|u| resolve_url(&u, &config.base_url))
        .filter(|u| !u.is_empty())
        .ok_or(ItemError::MissingProductUrl)?;

    let image_url = item
        .image_url
        .map(|u| resolve_url(&u, &config.base_url))
        .filter(|u| !u.is_empty());

    let available = classify_availability(
        item.stock_text.as_deref(),
        &config.negative_stock_terms,
        &config.positive_stock_terms,
    );

    Ok(Offer {
        store_id,
        store_name: config.name.clone(),
        title,
        price,
        available,
        product_url,
        image_url,
        original_price: None,
        seller_rating: None,
        shipping_note: None,
        scraped_at,
        has_error: false,
        error_message: None,
    })
}
