//! Offer mapping for MercadoLibre search results.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use partscout_core::adapter::outcome_label;
use partscout_core::{ExtractContext, Offer, RequestPacer, SearchQuery, SourceAdapter, StoreConfig};

use crate::client::MeliClient;
use crate::error::MeliError;
use crate::types::MeliListing;

pub struct MeliAdapter {
    config: StoreConfig,
    client: MeliClient,
    site_id: String,
    pacer: RequestPacer,
}

impl MeliAdapter {
    /// Builds an adapter for the marketplace entry in the stores file.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::Http`] if the HTTP client cannot be built.
    pub fn new(config: StoreConfig, site_id: &str, user_agent: &str) -> Result<Self, MeliError> {
        let client = MeliClient::with_base_url(config.timeout_secs, user_agent, &config.base_url)?;
        Ok(Self::with_client(config, site_id, client))
    }

    /// Builds an adapter around an existing client. Used by tests that
    /// point the client at a mock server.
    #[must_use]
    pub fn with_client(config: StoreConfig, site_id: &str, client: MeliClient) -> Self {
        let pacer = RequestPacer::new(config.request_delay_ms);
        Self {
            config,
            client,
            site_id: site_id.to_owned(),
            pacer,
        }
    }
}

#[async_trait]
impl SourceAdapter for MeliAdapter {
    fn can_handle(&self, store_name: &str) -> bool {
        self.config.name.eq_ignore_ascii_case(store_name)
    }

    async fn extract(
        &self,
        query: &SearchQuery,
        store_id: i64,
        ctx: &ExtractContext,
    ) -> Vec<Offer> {
        if !self.config.enabled {
            tracing::debug!(store = %self.config.name, "store disabled; skipping");
            return Vec::new();
        }

        self.pacer.pace().await;

        let response = match self
            .client
            .search(
                &self.site_id,
                &query.term,
                query.category.as_deref(),
                self.config.max_results,
            )
            .await
        {
            Ok(response) => response,
            Err(error) => {
                // This adapter's failure policy: an unreachable or
                // misbehaving API is an empty result, never a placeholder.
                tracing::warn!(store = %self.config.name, %error, "marketplace search failed");
                return Vec::new();
            }
        };

        let scraped_at = Utc::now();
        let attempted = response.results.len();

        let mut offers = Vec::new();
        let mut skipped = 0usize;
        for listing in response.results.into_iter().take(self.config.max_results) {
            if ctx.should_stop() {
                tracing::debug!(store = %self.config.name, "extraction cancelled between items");
                break;
            }
            match map_listing(store_id, &self.config, listing, scraped_at) {
                Some(offer) => offers.push(offer),
                None => skipped += 1,
            }
        }

        tracing::info!(
            store = %self.config.name,
            term = %query.term,
            attempted,
            emitted = offers.len(),
            skipped,
            outcome = outcome_label(offers.len(), 0),
            "marketplace extraction finished"
        );

        offers
    }

    fn describe_config(&self) -> BTreeMap<String, String> {
        let mut map = self.config.describe();
        map.insert("site_id".to_owned(), self.site_id.clone());
        map
    }
}

/// Maps one listing onto an offer, or `None` when the entry fails the
/// minimal validity check (`id` empty, non-positive price, no usable title
/// or link). Skipped entries only show up in debug logs; they never become
/// placeholders.
fn map_listing(
    store_id: i64,
    config: &StoreConfig,
    listing: MeliListing,
    scraped_at: DateTime<Utc>,
) -> Option<Offer> {
    if listing.id.is_empty() {
        tracing::debug!(store = %config.name, "listing without id skipped");
        return None;
    }

    let price = Decimal::try_from(listing.price).ok()?;
    if price <= Decimal::ZERO {
        tracing::debug!(store = %config.name, id = %listing.id, "listing without usable price skipped");
        return None;
    }

    let title = listing.title.trim().to_owned();
    if title.is_empty() {
        tracing::debug!(store = %config.name, id = %listing.id, "listing without title skipped");
        return None;
    }

    let product_url = listing.permalink.filter(|u| !u.is_empty())?;

    // Availability is the status flag plus remaining stock; either one
    // missing counts as available (default-open).
    let active = listing.status.as_deref().map_or(true, |s| s == "active");
    let in_stock = listing.available_quantity.map_or(true, |q| q > 0);
    let available = active && in_stock;

    let original_price = listing
        .original_price
        .and_then(|p| Decimal::try_from(p).ok())
        .filter(|p| *p > price);

    let seller_rating = listing
        .seller
        .and_then(|s| s.seller_reputation)
        .and_then(|r| r.level_id)
        .and_then(|level| seller_rating_from_level(&level));

    let shipping_note = listing.shipping.and_then(|s| {
        if s.free_shipping {
            Some("envío gratis".to_owned())
        } else {
            None
        }
    });

    Some(Offer {
        store_id,
        store_name: config.name.clone(),
        title,
        price,
        available,
        product_url,
        image_url: listing.thumbnail.filter(|u| !u.is_empty()),
        original_price,
        seller_rating,
        shipping_note,
        scraped_at,
        has_error: false,
        error_message: None,
    })
}

/// Maps the ordinal reputation scale (`"1_red"` … `"5_green"`) onto 1–5.
fn seller_rating_from_level(level_id: &str) -> Option<u8> {
    let digit = level_id.chars().next()?.to_digit(10)?;
    let digit = u8::try_from(digit).ok()?;
    (1..=5).contains(&digit).then_some(digit)
}
