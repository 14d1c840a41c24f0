//! The selector fallback engine.
//!
//! Both container discovery and per-field extraction are strategy ladders:
//! an ordered list of rules evaluated left to right until one yields a
//! non-empty value. First match wins; results from different rules are
//! never merged.

use scraper::{ElementRef, Html, Selector};

use partscout_core::{RawItem, SelectorSet};

use crate::error::ScraperError;

/// A [`partscout_core::FieldRule`] with its selector parsed up front.
#[derive(Debug)]
pub(crate) struct CompiledRule {
    selector: Selector,
    attr: Option<String>,
}

/// A [`SelectorSet`] compiled at adapter construction so that a bad
/// selector is a configuration error, not a silent per-call miss.
#[derive(Debug)]
pub(crate) struct CompiledSelectorSet {
    containers: Vec<(String, Selector)>,
    title: Vec<CompiledRule>,
    price: Vec<CompiledRule>,
    product_url: Vec<CompiledRule>,
    image_url: Vec<CompiledRule>,
    stock: Vec<CompiledRule>,
}

impl CompiledSelectorSet {
    pub(crate) fn compile(store: &str, set: &SelectorSet) -> Result<Self, ScraperError> {
        let containers = set
            .containers
            .iter()
            .map(|raw| Ok((raw.clone(), parse_selector(store, raw)?)))
            .collect::<Result<Vec<_>, ScraperError>>()?;

        Ok(Self {
            containers,
            title: compile_rules(store, &set.title)?,
            price: compile_rules(store, &set.price)?,
            product_url: compile_rules(store, &set.product_url)?,
            image_url: compile_rules(store, &set.image_url)?,
            stock: compile_rules(store, &set.stock)?,
        })
    }

    pub(crate) fn container_count(&self) -> usize {
        self.containers.len()
    }
}

fn compile_rules(
    store: &str,
    rules: &[partscout_core::FieldRule],
) -> Result<Vec<CompiledRule>, ScraperError> {
    rules
        .iter()
        .map(|rule| {
            Ok(CompiledRule {
                selector: parse_selector(store, &rule.selector)?,
                attr: rule.attr.clone(),
            })
        })
        .collect()
}

fn parse_selector(store: &str, raw: &str) -> Result<Selector, ScraperError> {
    Selector::parse(raw).map_err(|e| ScraperError::InvalidSelector {
        store: store.to_owned(),
        selector: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Finds the product containers: the first container selector matching at
/// least one node wins, and its matches are the candidate items. Returns
/// the winning selector for the log line.
pub(crate) fn find_containers<'a>(
    document: &'a Html,
    set: &'a CompiledSelectorSet,
) -> Option<(&'a str, Vec<ElementRef<'a>>)> {
    for (raw, selector) in &set.containers {
        let matches: Vec<ElementRef<'a>> = document.select(selector).collect();
        if !matches.is_empty() {
            return Some((raw.as_str(), matches));
        }
    }
    None
}

/// Extracts one field from a container by trying its rules in order.
///
/// A rule yields the first non-empty value among its matches (text content
/// or the named attribute); an empty yield moves on to the next rule.
pub(crate) fn extract_field(element: ElementRef<'_>, rules: &[CompiledRule]) -> Option<String> {
    for rule in rules {
        for node in element.select(&rule.selector) {
            let value = match &rule.attr {
                Some(attr) => node.value().attr(attr).unwrap_or("").trim().to_owned(),
                None => normalized_text(node),
            };
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Pulls every field of one candidate item through its fallback chain.
pub(crate) fn extract_raw_item(element: ElementRef<'_>, set: &CompiledSelectorSet) -> RawItem {
    RawItem {
        title: extract_field(element, &set.title),
        price_text: extract_field(element, &set.price),
        product_url: extract_field(element, &set.product_url),
        image_url: extract_field(element, &set.image_url),
        stock_text: extract_field(element, &set.stock),
    }
}

/// Text content with runs of whitespace collapsed to single spaces.
fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
