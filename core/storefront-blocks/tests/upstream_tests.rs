use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use storefront_blocks::{
    BlockError, ContentSource, MedusaProducts, ProductSource, StrapiContent, StrapiProducts,
    PRICE_TBD,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

// ── Construction ────────────────────────────────────────────────

#[test]
fn base_url_requires_http_scheme() {
    let err = StrapiContent::new("localhost:1337", TIMEOUT).unwrap_err();
    assert!(matches!(err, BlockError::InvalidBaseUrl(_)));
    assert!(MedusaProducts::new("ftp://example.com", "", TIMEOUT).is_err());
}

#[test]
fn trailing_slash_is_trimmed() {
    let content = StrapiContent::new("http://cms.test/", TIMEOUT).unwrap();
    assert_eq!(content.base_url(), "http://cms.test");
}

// ── Commerce engine ─────────────────────────────────────────────

async fn mount_regions(server: &MockServer, regions: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/store/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "regions": regions })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn medusa_products_priced_for_first_region() {
    let server = MockServer::start().await;
    mount_regions(&server, json!([{ "id": "reg_us" }, { "id": "reg_eu" }])).await;
    Mock::given(method("GET"))
        .and(path("/store/products"))
        .and(query_param("limit", "2"))
        .and(query_param("region_id", "reg_us"))
        .and(query_param("fields", "+variants.calculated_price"))
        .and(header("x-publishable-api-key", "pk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                {
                    "id": "prod_1",
                    "title": "Yard Sign",
                    "handle": "yard-sign",
                    "thumbnail": null,
                    "images": [{ "url": "http://img.test/sign.png" }],
                    "variants": [
                        { "calculated_price": { "calculated_amount": 2500, "currency_code": "usd" } },
                        { "calculated_price": { "calculated_amount": 1999, "currency_code": "usd" } }
                    ]
                },
                { "id": "prod_2", "title": "Gift Card", "handle": "gift-card", "variants": [] }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let medusa = MedusaProducts::new(&server.uri(), "pk_test", TIMEOUT).unwrap();
    let products = medusa.products(2).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].thumbnail, "http://img.test/sign.png");
    assert_eq!(products[0].price, "$19.99");
    assert_eq!(products[0].href(), "/store/yard-sign");
    assert_eq!(products[1].price, PRICE_TBD);
}

#[tokio::test]
async fn medusa_without_key_sends_no_key_header() {
    let server = MockServer::start().await;
    mount_regions(&server, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/store/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
        .mount(&server)
        .await;

    let medusa = MedusaProducts::new(&server.uri(), "", TIMEOUT).unwrap();
    assert!(medusa.products(6).await.unwrap().is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|r| r.headers.get("x-publishable-api-key").is_none()));
    let products_call = requests
        .iter()
        .find(|r| r.url.path() == "/store/products")
        .unwrap();
    assert!(!products_call.url.query().unwrap_or("").contains("region_id"));
}

#[tokio::test]
async fn medusa_rejection_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/store/regions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/store/products"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let medusa = MedusaProducts::new(&server.uri(), "bad", TIMEOUT).unwrap();
    match medusa.products(6).await.unwrap_err() {
        BlockError::Status { status, url } => {
            assert_eq!(status, 401);
            assert!(url.ends_with("/store/products"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

// ── CMS products ────────────────────────────────────────────────

#[tokio::test]
async fn strapi_products_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/medusa-products"))
        .and(query_param("pagination[pageSize]", "3"))
        .and(query_param("sort", "createdAt:desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": 12,
                    "medusa_id": "prod_abc",
                    "title": "Open House Kit",
                    "handle": "open-house-kit",
                    "thumbnail": "http://img.test/kit.png",
                    "variants": [{ "prices": [{ "amount": 4500, "currency_code": "usd" }] }]
                },
                { "id": 13, "title": "Unpriced", "handle": "" }
            ],
            "meta": { "pagination": { "total": 2 } }
        })))
        .mount(&server)
        .await;

    let strapi = StrapiProducts::new(&server.uri(), TIMEOUT).unwrap();
    let products = strapi.products(3).await.unwrap();

    assert_eq!(products[0].id, "prod_abc");
    assert_eq!(products[0].price, "$45.00");
    assert_eq!(products[1].id, "13");
    assert_eq!(products[1].price, PRICE_TBD);
    assert_eq!(products[1].href(), "#");
}

// ── CMS content ─────────────────────────────────────────────────

#[tokio::test]
async fn content_is_unwrapped_from_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/home-main-section"))
        .and(query_param("populate[Footer]", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "Footer": { "description": "From the CMS" } },
            "meta": {}
        })))
        .mount(&server)
        .await;

    let content = StrapiContent::new(&server.uri(), TIMEOUT).unwrap();
    let entry = content
        .fetch_json("/api/home-main-section", &[("populate[Footer]", "true".to_string())])
        .await
        .unwrap();
    assert_eq!(entry, json!({ "Footer": { "description": "From the CMS" } }));
}

#[tokio::test]
async fn content_without_envelope_is_returned_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let content = StrapiContent::new(&server.uri(), TIMEOUT).unwrap();
    assert_eq!(content.fetch_json("/api/raw", &[]).await.unwrap(), json!([1, 2, 3]));
}

#[tokio::test]
async fn content_not_found_is_an_error() {
    let server = MockServer::start().await;
    let content = StrapiContent::new(&server.uri(), TIMEOUT).unwrap();
    let err = content.fetch_json("/api/missing", &[]).await.unwrap_err();
    assert!(matches!(err, BlockError::Status { status: 404, .. }));
}
