//! Per-store selector profiles.
//!
//! Each profile is the ordered fallback chain observed on the live
//! storefront, broadest layout first. When a store reskins, the fix is
//! normally one more entry here — earlier selectors are kept while the old
//! layout still serves some category pages.

use partscout_core::{FieldRule, SelectorSet};

/// The selector profile registered for `store_name`, if any.
#[must_use]
pub fn selector_set_for(store_name: &str) -> Option<SelectorSet> {
    match store_name.to_lowercase().as_str() {
        "autoplanet" => Some(autoplanet()),
        "refax" => Some(refax()),
        "emasa" => Some(emasa()),
        _ => None,
    }
}

/// Autoplanet runs a Magento storefront. Search results render as
/// `.product-item` cards; the legacy grid (`.product-card`) still shows up
/// on some category landings.
fn autoplanet() -> SelectorSet {
    SelectorSet {
        containers: vec![
            "li.item.product.product-item".to_owned(),
            ".products-grid .product-item".to_owned(),
            ".product-card".to_owned(),
        ],
        title: vec![
            FieldRule::text("a.product-item-link"),
            FieldRule::text(".product-item-name"),
            FieldRule::text("h2.product-name"),
        ],
        price: vec![
            FieldRule::text(".price-box .special-price .price"),
            FieldRule::text(".price-box .price"),
            FieldRule::text(".product-price"),
        ],
        product_url: vec![
            FieldRule::attr("a.product-item-link", "href"),
            FieldRule::attr(".product-item-name a", "href"),
            FieldRule::attr("a", "href"),
        ],
        image_url: vec![
            FieldRule::attr("img.product-image-photo", "src"),
            FieldRule::attr("img", "data-src"),
            FieldRule::attr("img", "src"),
        ],
        stock: vec![
            FieldRule::text(".stock.unavailable"),
            FieldRule::text(".stock"),
            FieldRule::text(".availability"),
        ],
    }
}

/// Refax is WooCommerce: `ul.products > li.product`, sale prices inside
/// `ins`.
fn refax() -> SelectorSet {
    SelectorSet {
        containers: vec![
            "ul.products li.product".to_owned(),
            ".products .product".to_owned(),
        ],
        title: vec![
            FieldRule::text(".woocommerce-loop-product__title"),
            FieldRule::text("h2.product-title"),
            FieldRule::text("h2 a"),
        ],
        price: vec![
            FieldRule::text("span.price ins .woocommerce-Price-amount"),
            FieldRule::text("span.price .woocommerce-Price-amount"),
            FieldRule::text("span.price"),
        ],
        product_url: vec![
            FieldRule::attr("a.woocommerce-LoopProduct-link", "href"),
            FieldRule::attr("a", "href"),
        ],
        image_url: vec![
            FieldRule::attr("img.attachment-woocommerce_thumbnail", "src"),
            FieldRule::attr("img", "data-src"),
            FieldRule::attr("img", "src"),
        ],
        stock: vec![
            FieldRule::text(".outofstock-badge"),
            FieldRule::text(".stock"),
        ],
    }
}

/// Emasa is PrestaShop: `.product-miniature` articles with
/// `data-full-size-image-url` thumbnails.
fn emasa() -> SelectorSet {
    SelectorSet {
        containers: vec![
            "article.product-miniature".to_owned(),
            ".js-product-miniature".to_owned(),
            ".product-container".to_owned(),
        ],
        title: vec![
            FieldRule::text(".product-title a"),
            FieldRule::text("h3.product-title"),
            FieldRule::text(".product-name"),
        ],
        price: vec![
            FieldRule::text(".product-price-and-shipping .price"),
            FieldRule::text("span.price"),
            FieldRule::text(".product-price"),
        ],
        product_url: vec![
            FieldRule::attr(".product-title a", "href"),
            FieldRule::attr("a.thumbnail", "href"),
            FieldRule::attr("a", "href"),
        ],
        image_url: vec![
            FieldRule::attr(".thumbnail img", "data-full-size-image-url"),
            FieldRule::attr("img", "data-src"),
            FieldRule::attr("img", "src"),
        ],
        stock: vec![
            FieldRule::text(".product-availability"),
            FieldRule::text(".availability-label"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_exist_for_the_configured_static_stores() {
        for store in ["autoplanet", "refax", "emasa"] {
            let set = selector_set_for(store);
            assert!(set.is_some(), "missing selector profile for {store}");
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(selector_set_for("Autoplanet").is_some());
        assert!(selector_set_for("REFAX").is_some());
    }

    #[test]
    fn unknown_store_has_no_profile() {
        assert!(selector_set_for("sodimac").is_none());
    }

    #[test]
    fn every_profile_carries_the_required_chains() {
        for store in ["autoplanet", "refax", "emasa"] {
            let set = selector_set_for(store).unwrap();
            assert!(!set.containers.is_empty(), "{store}: no containers");
            assert!(!set.title.is_empty(), "{store}: no title rules");
            assert!(!set.price.is_empty(), "{store}: no price rules");
            assert!(!set.product_url.is_empty(), "{store}: no url rules");
        }
    }
}
