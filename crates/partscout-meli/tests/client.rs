//! Integration tests for `MeliClient` and `MeliAdapter` using wiremock
//! HTTP mocks.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use partscout_core::{
    AdapterKind, ExtractContext, PriceFormat, SearchQuery, SourceAdapter, StoreConfig,
};
use partscout_meli::{MeliAdapter, MeliClient, MeliError};

fn test_client(base_url: &str) -> MeliClient {
    MeliClient::with_base_url(5, "partscout-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn test_config(base_url: &str) -> StoreConfig {
    StoreConfig {
        name: "mercadolibre".to_owned(),
        kind: AdapterKind::Api,
        base_url: base_url.to_owned(),
        search_path_template: "/sites/MLC/search".to_owned(),
        max_results: 10,
        timeout_secs: 5,
        request_delay_ms: 0,
        enabled: true,
        price_format: PriceFormat::default(),
        negative_stock_terms: vec![],
        positive_stock_terms: vec![],
    }
}

fn search_fixture() -> serde_json::Value {
    json!({
        "paging": { "total": 3, "limit": 10, "offset": 0 },
        "results": [
            {
                "id": "MLC111",
                "title": "Bomba de agua Gates Hyundai Accent",
                "price": 28990,
                "original_price": 34990,
                "available_quantity": 12,
                "status": "active",
                "permalink": "https://articulo.mercadolibre.cl/MLC-111",
                "thumbnail": "http://http2.mlstatic.com/D_111-I.jpg",
                "condition": "new",
                "seller": {
                    "id": 555,
                    "nickname": "REPUESTOSCHILE",
                    "seller_reputation": { "level_id": "5_green" }
                },
                "shipping": { "free_shipping": true, "logistic_type": "fulfillment" }
            },
            {
                "id": "",
                "title": "Entrada corrupta sin id",
                "price": 9990,
                "permalink": "https://articulo.mercadolibre.cl/MLC-000"
            },
            {
                "id": "MLC333",
                "title": "Correa de distribución usada",
                "price": 0,
                "permalink": "https://articulo.mercadolibre.cl/MLC-333"
            }
        ]
    })
}

// ---------------------------------------------------------------------------
// client
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_sends_term_limit_and_zero_offset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/MLC/search"))
        .and(query_param("q", "bomba de agua"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_fixture()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .search("MLC", "bomba de agua", None, 10)
        .await
        .expect("should parse the fixture");

    assert_eq!(response.results.len(), 3);
    assert_eq!(response.paging.as_ref().map(|p| p.total), Some(3));
    assert_eq!(response.results[0].id, "MLC111");
}

#[tokio::test]
async fn search_passes_the_category_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/MLC/search"))
        .and(query_param("category", "MLC1747"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "results": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .search("MLC", "bujía", Some("MLC1747"), 10)
        .await
        .expect("should parse an empty result page");
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn search_surfaces_non_2xx_as_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("MLC", "bujía", None, 10).await.unwrap_err();
    assert!(
        matches!(err, MeliError::UnexpectedStatus { status: 429, .. }),
        "expected UnexpectedStatus(429), got: {err:?}"
    );
}

#[tokio::test]
async fn search_surfaces_malformed_json_as_deserialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("MLC", "bujía", None, 10).await.unwrap_err();
    assert!(
        matches!(err, MeliError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// adapter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extract_maps_valid_entries_and_skips_invalid_ones() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/MLC/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_fixture()))
        .mount(&server)
        .await;

    let adapter = MeliAdapter::with_client(
        test_config(&server.uri()),
        "MLC",
        test_client(&server.uri()),
    );
    let offers = adapter
        .extract(
            &SearchQuery::new("bomba de agua"),
            11,
            &ExtractContext::unbounded(),
        )
        .await;

    // The empty-id and zero-price entries are silently skipped.
    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.store_id, 11);
    assert_eq!(offer.title, "Bomba de agua Gates Hyundai Accent");
    assert!(offer.available);
    assert_eq!(offer.seller_rating, Some(5));
    assert_eq!(offer.shipping_note.as_deref(), Some("envío gratis"));
    assert!(offer.original_price.is_some());
    assert!(!offer.has_error);
}

#[tokio::test]
async fn extract_is_a_pure_mapping_over_the_fixture() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/MLC/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_fixture()))
        .mount(&server)
        .await;

    let adapter = MeliAdapter::with_client(
        test_config(&server.uri()),
        "MLC",
        test_client(&server.uri()),
    );
    let query = SearchQuery::new("bomba de agua");
    let first = adapter.extract(&query, 11, &ExtractContext::unbounded()).await;
    let second = adapter.extract(&query, 11, &ExtractContext::unbounded()).await;

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.title, b.title);
        assert_eq!(a.price, b.price);
        assert_eq!(a.available, b.available);
        assert_eq!(a.product_url, b.product_url);
        assert_eq!(a.image_url, b.image_url);
        assert_eq!(a.original_price, b.original_price);
        assert_eq!(a.seller_rating, b.seller_rating);
        assert_eq!(a.shipping_note, b.shipping_note);
    }
}

#[tokio::test]
async fn api_failure_yields_an_empty_list_without_placeholders() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = MeliAdapter::with_client(
        test_config(&server.uri()),
        "MLC",
        test_client(&server.uri()),
    );
    let offers = adapter
        .extract(&SearchQuery::new("bujía"), 1, &ExtractContext::unbounded())
        .await;
    assert!(offers.is_empty(), "API failures never produce placeholder offers");
}

#[tokio::test]
async fn disabled_marketplace_short_circuits() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri());
    config.enabled = false;
    let adapter = MeliAdapter::with_client(config, "MLC", test_client(&server.uri()));

    let offers = adapter
        .extract(&SearchQuery::new("bujía"), 1, &ExtractContext::unbounded())
        .await;
    assert!(offers.is_empty());
    assert!(
        server.received_requests().await.unwrap_or_default().is_empty(),
        "disabled store must not hit the network"
    );
}
