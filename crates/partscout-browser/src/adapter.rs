//! The browser-automation adapter.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chrono::Utc;

use partscout_core::adapter::outcome_label;
use partscout_core::{
    assemble_offer, ExtractContext, FieldRule, ItemError, Offer, RawItem, RequestPacer,
    SearchQuery, SelectorSet, SourceAdapter, StoreConfig,
};

use crate::error::BrowserError;
use crate::profiles;
use crate::session::{BrowserSession, SessionConfig};

/// How long one container selector is polled for a visible match before the
/// ladder moves on.
const CONTAINER_POLL_ATTEMPTS: u32 = 3;
const CONTAINER_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct BrowserStoreAdapter {
    config: StoreConfig,
    selectors: SelectorSet,
    session_config: SessionConfig,
    pacer: RequestPacer,
}

impl BrowserStoreAdapter {
    /// Builds an adapter for `config` using the selector profile registered
    /// under the store's name. Returns `None` when no profile exists — a
    /// configuration error the caller reports before any extraction runs.
    #[must_use]
    pub fn new(config: StoreConfig, session_config: SessionConfig) -> Option<Self> {
        let selectors = profiles::selector_set_for(&config.name)?;
        Some(Self::with_selector_set(config, selectors, session_config))
    }

    /// Builds an adapter with an explicit selector set.
    #[must_use]
    pub fn with_selector_set(
        config: StoreConfig,
        selectors: SelectorSet,
        session_config: SessionConfig,
    ) -> Self {
        let pacer = RequestPacer::new(config.request_delay_ms);
        Self {
            config,
            selectors,
            session_config,
            pacer,
        }
    }

    /// Runs the container ladder against the live document: each selector
    /// is polled briefly for a visible match, first hit wins.
    async fn find_container_selector(
        &self,
        session: &BrowserSession,
        ctx: &ExtractContext,
    ) -> Result<Option<(&str, u64)>, BrowserError> {
        for selector in &self.selectors.containers {
            for attempt in 0..CONTAINER_POLL_ATTEMPTS {
                if ctx.should_stop() {
                    return Ok(None);
                }
                let count = session.visible_count(selector).await?;
                if count > 0 {
                    return Ok(Some((selector.as_str(), count)));
                }
                if attempt + 1 < CONTAINER_POLL_ATTEMPTS {
                    tokio::time::sleep(CONTAINER_POLL_INTERVAL).await;
                }
            }
        }
        Ok(None)
    }

    /// First-match-wins field extraction through child queries against one
    /// live element. A missing child moves to the next rule; a protocol
    /// failure on a found child aborts the item.
    async fn field_value(
        element: &Element,
        rules: &[FieldRule],
    ) -> Result<Option<String>, BrowserError> {
        for rule in rules {
            let Ok(child) = element.find_element(rule.selector.as_str()).await else {
                continue;
            };
            let value = match &rule.attr {
                Some(attr) => child.attribute(attr.as_str()).await?.unwrap_or_default(),
                None => child.inner_text().await?.unwrap_or_default(),
            };
            let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
            if !value.is_empty() {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    async fn extract_item(&self, element: &Element) -> Result<RawItem, BrowserError> {
        Ok(RawItem {
            title: Self::field_value(element, &self.selectors.title).await?,
            price_text: Self::field_value(element, &self.selectors.price).await?,
            product_url: Self::field_value(element, &self.selectors.product_url).await?,
            image_url: Self::field_value(element, &self.selectors.image_url).await?,
            stock_text: Self::field_value(element, &self.selectors.stock).await?,
        })
    }

    /// Writes the rendered document to the diagnostics directory so a
    /// selector drift can be debugged from the capture instead of a live
    /// re-run.
    async fn capture_snapshot(&self, session: &BrowserSession) {
        let dir = self
            .session_config
            .snapshot_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let filename = format!(
            "partscout-{}-{}.html",
            self.config.name,
            Utc::now().format("%Y%m%dT%H%M%SZ")
        );
        let path = dir.join(filename);

        match session.page_html().await {
            Ok(html) => match tokio::fs::write(&path, html).await {
                Ok(()) => {
                    tracing::info!(store = %self.config.name, path = %path.display(), "diagnostic snapshot written");
                }
                Err(error) => {
                    tracing::warn!(store = %self.config.name, %error, "failed to write diagnostic snapshot");
                }
            },
            Err(error) => {
                tracing::debug!(store = %self.config.name, %error, "failed to capture page HTML");
            }
        }
    }

    /// Everything between a successful launch and teardown. Split out so
    /// `extract` can release the session on every path.
    async fn run_extraction(
        &self,
        session: &BrowserSession,
        url: &str,
        query: &SearchQuery,
        store_id: i64,
        ctx: &ExtractContext,
    ) -> Vec<Offer> {
        let timeout = Duration::from_secs(self.config.timeout_secs);
        if let Err(error) = session.navigate(url, timeout).await {
            tracing::warn!(store = %self.config.name, url, %error, "navigation failed");
            return Vec::new();
        }

        let (selector, total_found) = match self.find_container_selector(session, ctx).await {
            Ok(Some(found)) => found,
            Ok(None) => {
                if !ctx.should_stop() {
                    tracing::warn!(
                        store = %self.config.name,
                        term = %query.term,
                        tried = self.selectors.containers.len(),
                        "no container selector matched the rendered page"
                    );
                    self.capture_snapshot(session).await;
                }
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!(store = %self.config.name, %error, "container probe failed");
                return Vec::new();
            }
        };

        tracing::debug!(
            store = %self.config.name,
            selector,
            total_found,
            "container selector matched"
        );

        let elements = match session.find_elements(selector).await {
            Ok(elements) => elements,
            Err(error) => {
                tracing::warn!(store = %self.config.name, %error, "element query failed");
                return Vec::new();
            }
        };

        let scraped_at = Utc::now();
        let limit = self.config.max_results.min(elements.len());

        let mut offers = Vec::new();
        let mut dropped = 0usize;
        let mut faulted = 0usize;
        for (index, element) in elements.iter().take(limit).enumerate() {
            if ctx.should_stop() {
                tracing::debug!(store = %self.config.name, "extraction cancelled between items");
                break;
            }

            match self.extract_item(element).await {
                Ok(raw) => match assemble_offer(store_id, &self.config, raw, scraped_at) {
                    Ok(offer) => offers.push(offer),
                    Err(error) => {
                        dropped += 1;
                        tracing::debug!(store = %self.config.name, %error, "dropping candidate item");
                    }
                },
                Err(error) => {
                    // One broken card must not abort the batch; emit a
                    // tagged placeholder for the slot and continue.
                    faulted += 1;
                    tracing::warn!(store = %self.config.name, index, %error, "item extraction failed");
                    let item_error = ItemError::Dom(error.to_string());
                    offers.push(Offer::error_placeholder(
                        store_id,
                        &self.config.name,
                        item_error.to_string(),
                        scraped_at,
                    ));
                }
            }
        }

        let emitted = offers.iter().filter(|o| !o.has_error).count();
        tracing::info!(
            store = %self.config.name,
            term = %query.term,
            total_found,
            attempted = limit,
            emitted,
            dropped,
            faulted,
            outcome = outcome_label(emitted, faulted),
            "browser extraction finished"
        );

        offers
    }
}

#[async_trait]
impl SourceAdapter for BrowserStoreAdapter {
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

        let session = match BrowserSession::launch(&self.session_config).await {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(store = %self.config.name, %error, "browser launch failed");
                return Vec::new();
            }
        };

        // The session is closed whatever run_extraction returns; the
        // browser process must not outlive the call.
        let offers = self
            .run_extraction(&session, &url, query, store_id, ctx)
            .await;
        session.close().await;

        offers
    }

    fn describe_config(&self) -> BTreeMap<String, String> {
        let mut map = self.config.describe();
        map.insert(
            "container_selectors".to_owned(),
            self.selectors.containers.len().to_string(),
        );
        map.insert("locale".to_owned(), self.session_config.locale.clone());
        map.insert(
            "viewport".to_owned(),
            format!(
                "{}x{}",
                self.session_config.viewport.0, self.session_config.viewport.1
            ),
        );
        map
    }
}
