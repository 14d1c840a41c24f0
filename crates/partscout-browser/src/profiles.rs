//! Selector profiles for JavaScript-rendered storefronts.

use partscout_core::{FieldRule, SelectorSet};

/// The selector profile registered for `store_name`, if any.
#[must_use]
pub fn selector_set_for(store_name: &str) -> Option<SelectorSet> {
    match store_name.to_lowercase().as_str() {
        "sodimac" => Some(sodimac()),
        _ => None,
    }
}

/// Sodimac's search results are a React grid; nothing useful exists in the
/// initial HTML. The `data-testid` hooks are the most stable layer, with
/// the legacy class names behind them.
fn sodimac() -> SelectorSet {
    SelectorSet {
        containers: vec![
            "[data-testid='product-pod']".to_owned(),
            "#testId-searchResults .grid-pod".to_owned(),
            ".product-card".to_owned(),
        ],
        title: vec![
            FieldRule::text("[data-testid='pod-title']"),
            FieldRule::text(".pod-title"),
            FieldRule::text("h2"),
        ],
        price: vec![
            FieldRule::text("[data-testid='pod-price']"),
            FieldRule::text(".pod-prices .price"),
            FieldRule::text(".price"),
        ],
        product_url: vec![
            FieldRule::attr("a[data-testid='pod-link']", "href"),
            FieldRule::attr("a", "href"),
        ],
        image_url: vec![
            FieldRule::attr("img[data-testid='pod-image']", "src"),
            FieldRule::attr("img", "data-src"),
            FieldRule::attr("img", "src"),
        ],
        stock: vec![
            FieldRule::text("[data-testid='pod-availability']"),
            FieldRule::text(".stock-status"),
        ],
    }
}
