use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use demolition_backend::config::{GeminiConfig, GeoapifyConfig};
use demolition_backend::router::proxy_router::proxy_router;
use demolition_backend::service::autocomplete_service::AutocompleteServiceImpl;
use demolition_backend::service::estimate_service::{EstimateServiceImpl, FALLBACK_ESTIMATE};
use demolition_backend::util::gemini::GeminiClient;
use demolition_backend::util::geoapify::GeoapifyClient;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn router_for(base_url: &str, api_key: Option<&str>) -> Router {
    let gemini = GeminiClient::new(GeminiConfig {
        api_key: api_key.map(str::to_string),
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap();
    let geoapify = GeoapifyClient::new(GeoapifyConfig::default()).unwrap();
    proxy_router(
        Arc::new(AutocompleteServiceImpl::new(Arc::new(geoapify))),
        Arc::new(EstimateServiceImpl::new(Arc::new(gemini))),
    )
}

fn reply_with(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    }))
}

async fn post_estimate(app: Router, body: Body) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/estimate")
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn project() -> Body {
    Body::from(
        json!({
            "demolition_type": "Interior",
            "square_footage": "1500",
            "city": "Austin",
            "state": "TX"
        })
        .to_string(),
    )
}

#[tokio::test]
async fn returns_the_generated_price_range() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "gen-key"))
        .and(body_string_contains("Square footage: 1500 sq ft"))
        .respond_with(reply_with("Estimated: $9,000 - $14,000"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_estimate(router_for(&server.uri(), Some("gen-key")), project()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "estimate": "$9,000 - $14,000" }));
}

#[tokio::test]
async fn provider_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_estimate(router_for(&server.uri(), Some("gen-key")), project()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false, "estimate": FALLBACK_ESTIMATE }));
}

#[tokio::test]
async fn answer_without_dollar_amount_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(reply_with("It depends on many factors."))
        .mount(&server)
        .await;

    let (status, body) = post_estimate(router_for(&server.uri(), Some("gen-key")), project()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["estimate"], "Contact for estimate");
}

#[tokio::test]
async fn missing_key_falls_back_without_calling_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(reply_with("$1 - $2")).expect(0).mount(&server).await;

    let (status, body) = post_estimate(router_for(&server.uri(), None), project()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false, "estimate": FALLBACK_ESTIMATE }));
}

#[tokio::test]
async fn unreadable_request_falls_back() {
    let (status, body) = post_estimate(router_for("http://127.0.0.1:9", Some("gen-key")), Body::from("{ nope")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false, "estimate": FALLBACK_ESTIMATE }));
}
