//! Ordered extraction rules for HTML-based stores.
//!
//! A [`SelectorSet`] is plain data: per-field lists of CSS selector rules
//! tried left to right until one yields a non-empty value
//! (first-match-wins, no merging). Keeping the rules as values rather than
//! per-store adapter types means supporting a new store is a new profile,
//! not new code.

use serde::{Deserialize, Serialize};

/// One extraction rule: a CSS selector plus the value source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub selector: String,
    /// `None` reads the matched element's text content; `Some(name)` reads
    /// the named attribute.
    pub attr: Option<String>,
}

impl FieldRule {
    #[must_use]
    pub fn text(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attr: None,
        }
    }

    #[must_use]
    pub fn attr(selector: impl Into<String>, attr: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attr: Some(attr.into()),
        }
    }
}

/// Every selector chain one HTML store needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Product-container candidates, tried in order; the first selector
    /// matching at least one node wins.
    pub containers: Vec<String>,
    pub title: Vec<FieldRule>,
    pub price: Vec<FieldRule>,
    pub product_url: Vec<FieldRule>,
    pub image_url: Vec<FieldRule>,
    pub stock: Vec<FieldRule>,
}
