use super::*;
use chrono::Utc;
use partscout_core::{AdapterKind, FieldRule, PriceFormat};
use rust_decimal::Decimal;

fn test_config(name: &str) -> StoreConfig {
    StoreConfig {
        name: name.to_owned(),
        kind: AdapterKind::Static,
        base_url: "https://repuestos.example.cl".to_owned(),
        search_path_template: "/search?q={term}".to_owned(),
        max_results: 10,
        timeout_secs: 5,
        request_delay_ms: 0,
        enabled: true,
        price_format: PriceFormat::default(),
        negative_stock_terms: vec![],
        positive_stock_terms: vec![],
    }
}

fn test_selector_set() -> SelectorSet {
    SelectorSet {
        containers: vec!["div.product".to_owned()],
        title: vec![FieldRule::text(".name")],
        price: vec![FieldRule::text(".price")],
        product_url: vec![FieldRule::attr("a", "href")],
        image_url: vec![FieldRule::attr("img", "src")],
        stock: vec![FieldRule::text(".stock")],
    }
}

fn test_adapter(name: &str) -> StaticStoreAdapter {
    StaticStoreAdapter::with_selector_set(test_config(name), &test_selector_set(), "test-agent/1.0")
        .expect("adapter should build")
}

#[test]
fn can_handle_matches_case_insensitively() {
    let adapter = test_adapter("autoplanet");
    assert!(adapter.can_handle("autoplanet"));
    assert!(adapter.can_handle("AutoPlanet"));
    assert!(!adapter.can_handle("refax"));
}

#[test]
fn new_rejects_stores_without_a_profile() {
    let result = StaticStoreAdapter::new(test_config("unknown-store"), "test-agent/1.0");
    assert!(
        matches!(result, Err(ScraperError::UnknownProfile(ref name)) if name == "unknown-store"),
        "expected UnknownProfile"
    );
}

#[test]
fn new_builds_adapters_for_registered_profiles() {
    for store in ["autoplanet", "refax", "emasa"] {
        let result = StaticStoreAdapter::new(test_config(store), "test-agent/1.0");
        assert!(result.is_ok(), "profile {store} should build: {:?}", result.err());
    }
}

#[test]
fn describe_config_reports_the_store_settings() {
    let adapter = test_adapter("autoplanet");
    let described = adapter.describe_config();
    assert_eq!(described.get("store").map(String::as_str), Some("autoplanet"));
    assert_eq!(described.get("kind").map(String::as_str), Some("static"));
    assert_eq!(described.get("max_results").map(String::as_str), Some("10"));
    assert_eq!(
        described.get("container_selectors").map(String::as_str),
        Some("1")
    );
}

#[tokio::test]
async fn disabled_store_short_circuits_before_any_network_call() {
    // base_url points nowhere routable; if the adapter tried the network
    // this test would hang on the connect timeout instead of returning
    // instantly.
    let mut config = test_config("autoplanet");
    config.enabled = false;
    let adapter =
        StaticStoreAdapter::with_selector_set(config, &test_selector_set(), "test-agent/1.0")
            .unwrap();

    let offers = adapter
        .extract(&SearchQuery::new("bujía"), 1, &ExtractContext::unbounded())
        .await;
    assert!(offers.is_empty());
}

// ---------------------------------------------------------------------------
// parse_items + assembly (no network)
// ---------------------------------------------------------------------------

const THREE_PRODUCT_PAGE: &str = r#"
<html><body>
  <div class="product">
    <span class="name">Pastillas de freno Bosch</span>
    <span class="price">$12.990</span>
    <a href="/p/1">ver</a>
    <img src="/img/1.jpg">
  </div>
  <div class="product">
    <span class="name">Disco de freno Brembo</span>
    <span class="price">Consultar</span>
    <a href="/p/2">ver</a>
  </div>
  <div class="product">
    <span class="name">Líquido de frenos DOT4</span>
    <span class="price">$4.590</span>
    <a href="/p/3">ver</a>
    <span class="stock">Agotado</span>
  </div>
</body></html>
"#;

#[test]
fn parse_items_caps_at_max_results() {
    let mut config = test_config("autoplanet");
    config.max_results = 2;
    let adapter =
        StaticStoreAdapter::with_selector_set(config, &test_selector_set(), "test-agent/1.0")
            .unwrap();
    let items = adapter.parse_items(THREE_PRODUCT_PAGE, &ExtractContext::unbounded());
    assert_eq!(items.len(), 2);
}

#[test]
fn parse_items_stops_when_cancelled() {
    let adapter = test_adapter("autoplanet");
    let token = tokio_util::sync::CancellationToken::new();
    token.cancel();
    let ctx = ExtractContext::with_cancellation(token);
    let items = adapter.parse_items(THREE_PRODUCT_PAGE, &ctx);
    assert!(items.is_empty(), "cancelled context must stop between items");
}

#[test]
fn unpriced_block_is_dropped_and_the_rest_survive() {
    let adapter = test_adapter("autoplanet");
    let items = adapter.parse_items(THREE_PRODUCT_PAGE, &ExtractContext::unbounded());
    assert_eq!(items.len(), 3);

    let scraped_at = Utc::now();
    let offers: Vec<Offer> = items
        .into_iter()
        .filter_map(|item| assemble_offer(42, &adapter.config, item, scraped_at).ok())
        .collect();

    assert_eq!(offers.len(), 2, "the block without a parsable price drops");
    assert!(offers.iter().all(|o| o.price > Decimal::ZERO));
    assert!(offers.iter().all(|o| o.store_id == 42));
    assert_eq!(offers[0].title, "Pastillas de freno Bosch");
    assert_eq!(offers[0].price, Decimal::from(12_990));
    assert!(offers[0].available);
    assert_eq!(
        offers[0].product_url,
        "https://repuestos.example.cl/p/1"
    );
    assert_eq!(offers[1].title, "Líquido de frenos DOT4");
    assert!(!offers[1].available, "Agotado marks the item unavailable");
}
