//! HTTP client for the MercadoLibre public search API.
//!
//! Wraps `reqwest` with typed response deserialization and the
//! base-URL override needed to point tests at a mock server.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::MeliError;
use crate::types::MeliSearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.mercadolibre.com/";

/// Client for `GET /sites/{site}/search`.
///
/// Use [`MeliClient::new`] for production or [`MeliClient::with_base_url`]
/// to point at a wiremock server in tests.
pub struct MeliClient {
    client: Client,
    base_url: Url,
}

impl MeliClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, MeliError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MeliError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MeliError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, MeliError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so `join` appends to the
        // root path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| MeliError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Runs one search against the fixed JSON endpoint: the term, a
    /// result-count limit and zero offset, plus an optional category
    /// filter.
    ///
    /// # Errors
    ///
    /// - [`MeliError::UnexpectedStatus`] — non-2xx HTTP status.
    /// - [`MeliError::Http`] — network or TLS failure.
    /// - [`MeliError::Deserialize`] — the response does not match the
    ///   expected shape.
    pub async fn search(
        &self,
        site_id: &str,
        term: &str,
        category: Option<&str>,
        limit: usize,
    ) -> Result<MeliSearchResponse, MeliError> {
        let mut url = self
            .base_url
            .join(&format!("sites/{site_id}/search"))
            .map_err(|e| MeliError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        url.query_pairs_mut()
            .append_pair("q", term)
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", "0");
        if let Some(category) = category {
            url.query_pairs_mut().append_pair("category", category);
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MeliError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<MeliSearchResponse>(&body).map_err(|e| MeliError::Deserialize {
            context: format!("search(site={site_id}, q={term})"),
            source: e,
        })
    }
}
