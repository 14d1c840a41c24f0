//! Store descriptors and their YAML configuration file.
//!
//! A [`StoreConfig`] is loaded once at adapter construction and never
//! mutated during a call. The file format is a single `stores:` list; see
//! `config/stores.yaml` at the workspace root.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::offer::SearchQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    Static,
    Api,
    Browser,
}

impl std::fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterKind::Static => write!(f, "static"),
            AdapterKind::Api => write!(f, "api"),
            AdapterKind::Browser => write!(f, "browser"),
        }
    }
}

/// How a store renders prices. The default is the Chilean notation where
/// `$12.990` means twelve thousand nine hundred ninety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormat {
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

/// Immutable per-store descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: String,
    pub kind: AdapterKind,
    pub base_url: String,
    /// Path-and-query template with a `{term}` placeholder (and optionally
    /// `{category}`); values are percent-encoded before substitution.
    pub search_path_template: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub price_format: PriceFormat,
    /// Store-specific stock phrases marking an item unavailable, on top of
    /// the built-in list.
    #[serde(default)]
    pub negative_stock_terms: Vec<String>,
    /// Store-specific stock phrases marking an item available.
    #[serde(default)]
    pub positive_stock_terms: Vec<String>,
}

impl StoreConfig {
    /// Builds the search URL for `query` by substituting percent-encoded
    /// values into the template. A `{category}` placeholder collapses to
    /// the empty string when the query has no category.
    #[must_use]
    pub fn search_url(&self, query: &SearchQuery) -> String {
        let term = utf8_percent_encode(&query.term, NON_ALPHANUMERIC).to_string();
        let category = query
            .category
            .as_deref()
            .map(|c| utf8_percent_encode(c, NON_ALPHANUMERIC).to_string())
            .unwrap_or_default();

        let path = self
            .search_path_template
            .replace("{term}", &term)
            .replace("{category}", &category);

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Diagnostics snapshot shared by `describe_config` implementations.
    #[must_use]
    pub fn describe(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("store".to_owned(), self.name.clone()),
            ("kind".to_owned(), self.kind.to_string()),
            ("base_url".to_owned(), self.base_url.clone()),
            (
                "search_path_template".to_owned(),
                self.search_path_template.clone(),
            ),
            ("max_results".to_owned(), self.max_results.to_string()),
            ("timeout_secs".to_owned(), self.timeout_secs.to_string()),
            (
                "request_delay_ms".to_owned(),
                self.request_delay_ms.to_string(),
            ),
            ("enabled".to_owned(), self.enabled.to_string()),
        ])
    }
}

fn default_max_results() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_request_delay_ms() -> u64 {
    250
}

fn default_enabled() -> bool {
    true
}

fn default_thousands_separator() -> char {
    '.'
}

fn default_decimal_separator() -> char {
    ','
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreConfig>,
}

impl StoresFile {
    /// Looks a store up by name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StoreConfig> {
        self.stores
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// Load and validate the stores configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_stores(path: &Path) -> Result<StoresFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let stores_file: StoresFile =
        serde_yaml::from_str(&content).map_err(ConfigError::StoresFileParse)?;

    validate_stores(&stores_file)?;

    Ok(stores_file)
}

fn validate_stores(stores_file: &StoresFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for store in &stores_file.stores {
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store name must be non-empty".to_owned(),
            ));
        }

        if !seen_names.insert(store.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store name: '{}'",
                store.name
            )));
        }

        let parsed = Url::parse(&store.base_url).map_err(|e| {
            ConfigError::Validation(format!(
                "store '{}' has invalid base_url '{}': {e}",
                store.name, store.base_url
            ))
        })?;
        if parsed.host_str().is_none() {
            return Err(ConfigError::Validation(format!(
                "store '{}' base_url '{}' has no host",
                store.name, store.base_url
            )));
        }

        if !store.search_path_template.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "store '{}' search_path_template must start with '/'",
                store.name
            )));
        }

        // API stores build their query through the typed client; everything
        // else substitutes the term into the template.
        if store.kind != AdapterKind::Api && !store.search_path_template.contains("{term}") {
            return Err(ConfigError::Validation(format!(
                "store '{}' search_path_template is missing the {{term}} placeholder",
                store.name
            )));
        }

        if store.max_results == 0 {
            return Err(ConfigError::Validation(format!(
                "store '{}' max_results must be at least 1",
                store.name
            )));
        }

        if store.price_format.thousands_separator == store.price_format.decimal_separator {
            return Err(ConfigError::Validation(format!(
                "store '{}' price separators must differ",
                store.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
