//! The generic static-document adapter.
//!
//! Fetches a search page over plain HTTP, runs the selector fallback
//! engine over the parsed document and assembles offers. All per-store
//! variation comes in through [`partscout_core::StoreConfig`] and the
//! selector profile.

use std::collections::BTreeMap;

use async_trait::async_trait;

use partscout_core::adapter::outcome_label;
use partscout_core::{
    assemble_offer, ExtractContext, Offer, RawItem, RequestPacer, SearchQuery, SelectorSet,
    SourceAdapter, StoreConfig,
};

use crate::client::StoreHttpClient;
use crate::error::ScraperError;
use crate::extract::{extract_raw_item, find_containers, CompiledSelectorSet};
use crate::profiles;

pub struct StaticStoreAdapter {
    config: StoreConfig,
    selectors: CompiledSelectorSet,
    client: StoreHttpClient,
    pacer: RequestPacer,
}

impl StaticStoreAdapter {
    /// Builds an adapter for `config` using the selector profile registered
    /// under the store's name.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnknownProfile`] when no profile exists for the
    ///   store.
    /// - [`ScraperError::InvalidSelector`] when a profile selector does not
    ///   parse.
    /// - [`ScraperError::Http`] when the HTTP client cannot be built.
    pub fn new(config: StoreConfig, user_agent: &str) -> Result<Self, ScraperError> {
        let set = profiles::selector_set_for(&config.name)
            .ok_or_else(|| ScraperError::UnknownProfile(config.name.clone()))?;
        Self::with_selector_set(config, &set, user_agent)
    }

    /// Builds an adapter with an explicit selector set. Used by tests and
    /// one-off deployments that ship their own profile.
    ///
    /// # Errors
    ///
    /// Same as [`StaticStoreAdapter::new`], minus the profile lookup.
    pub fn with_selector_set(
        config: StoreConfig,
        set: &SelectorSet,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let selectors = CompiledSelectorSet::compile(&config.name, set)?;
        let client = StoreHttpClient::new(config.timeout_secs, user_agent)?;
        let pacer = RequestPacer::new(config.request_delay_ms);
        Ok(Self {
            config,
            selectors,
            client,
            pacer,
        })
    }

    /// Parses the fetched body into raw items. Synchronous on purpose: the
    /// parsed document is not `Send` and must never live across an await.
    fn parse_items(&self, body: &str, ctx: &ExtractContext) -> Vec<RawItem> {
        let document = scraper::Html::parse_document(body);

        let Some((winner, containers)) = find_containers(&document, &self.selectors) else {
            tracing::debug!(
                store = %self.config.name,
                tried = self.selectors.container_count(),
                "no container selector matched"
            );
            return Vec::new();
        };

        tracing::debug!(
            store = %self.config.name,
            selector = winner,
            matched = containers.len(),
            "container selector matched"
        );

        let mut items = Vec::new();
        for element in containers.into_iter().take(self.config.max_results) {
            if ctx.should_stop() {
                tracing::debug!(store = %self.config.name, "extraction cancelled between items");
                break;
            }
            items.push(extract_raw_item(element, &self.selectors));
        }
        items
    }
}

#[async_trait]
impl SourceAdapter for StaticStoreAdapter {
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

        let url = self.config.search_url(query);

        self.pacer.pace().await;

        let page = match self.client.fetch_page(&url).await {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!(store = %self.config.name, url, %error, "search page fetch failed");
                return Vec::new();
            }
        };

        let raw_items = self.parse_items(&page.body, ctx);
        let attempted = raw_items.len();
        let scraped_at = page.fetched_at;

        let mut offers = Vec::new();
        let mut dropped = 0usize;
        for item in raw_items {
            match assemble_offer(store_id, &self.config, item, scraped_at) {
                Ok(offer) => offers.push(offer),
                Err(error) => {
                    dropped += 1;
                    tracing::debug!(store = %self.config.name, %error, "dropping candidate item");
                }
            }
        }

        tracing::info!(
            store = %self.config.name,
            term = %query.term,
            attempted,
            emitted = offers.len(),
            dropped,
            outcome = outcome_label(offers.len(), 0),
            "static extraction finished"
        );

        offers
    }

    fn describe_config(&self) -> BTreeMap<String, String> {
        let mut map = self.config.describe();
        map.insert(
            "container_selectors".to_owned(),
            self.selectors.container_count().to_string(),
        );
        map
    }
}

#[cfg(test)]
#[path = "adapter_test.rs"]
mod tests;
