//! HTTP client for static storefront search pages.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::error::ScraperError;

/// A fetched search page. Produced and consumed within one extraction
/// call, never persisted.
#[derive(Debug)]
pub struct FetchedPage {
    pub source_url: String,
    pub content_type: Option<String>,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

/// Thin wrapper over `reqwest` that fetches search pages with browser-like
/// headers.
///
/// One attempt per call — a failed request is this invocation's result;
/// freshness is best-effort and retrying is the orchestrator's decision.
pub struct StoreHttpClient {
    client: Client,
}

impl StoreHttpClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the HTML of `url`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScraperError::EmptyBody`] — 2xx with a blank body (some
    ///   anti-bot stacks answer 200 with nothing useful).
    /// - [`ScraperError::Http`] — network or TLS failure, timeout
    ///   included.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "es-CL,es;q=0.9,en;q=0.8")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(ScraperError::EmptyBody {
                url: url.to_owned(),
            });
        }

        Ok(FetchedPage {
            source_url: url.to_owned(),
            content_type,
            body,
            fetched_at: Utc::now(),
        })
    }
}
