use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use aama_api::{build_app, ApiConfig, REVIEWS_PATH};
use aama_core::ChatSession;
use aama_reviews::{GatewayConfig, ProxyClient, ReviewsView, ViewState};
use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

const TEST_KEY: &str = "test-key";
const TEST_BUSINESS: &str = "aama-test";

#[derive(Clone)]
struct Upstream {
    business_status: Arc<AtomicU16>,
    reviews_status: Arc<AtomicU16>,
}

impl Upstream {
    fn healthy() -> Self {
        Self {
            business_status: Arc::new(AtomicU16::new(200)),
            reviews_status: Arc::new(AtomicU16::new(200)),
        }
    }
}

fn upstream_business_body() -> Value {
    json!({
        "id": TEST_BUSINESS,
        "alias": "aama-day-care-san-ramon-2",
        "name": "Aama Day Care",
        "rating": 5.0,
        "review_count": 9,
        "url": "https://www.yelp.com/biz/aama-day-care-san-ramon-2",
        "phone": "+15107783220",
        "is_closed": false
    })
}

fn upstream_reviews_body() -> Value {
    json!({
        "reviews": [
            {
                "id": "r1",
                "url": "https://www.yelp.com/biz/aama?hrid=r1",
                "text": "Miss Rasu is wonderful.",
                "rating": 5,
                "time_created": "2025-05-21 10:00:00",
                "user": {
                    "id": "u1",
                    "profile_url": "https://www.yelp.com/user_details?userid=u1",
                    "image_url": null,
                    "name": "Tenzing P."
                }
            },
            {
                "id": "r2",
                "url": "https://www.yelp.com/biz/aama?hrid=r2",
                "text": "Safe and loving.",
                "rating": 4,
                "time_created": "2024-06-10 08:30:00",
                "user": {
                    "id": "u2",
                    "profile_url": "https://www.yelp.com/user_details?userid=u2",
                    "image_url": "https://s3-media.fl.yelpcdn.com/u2.jpg",
                    "name": "Richa G."
                }
            },
            {
                "id": "r3",
                "url": "https://www.yelp.com/biz/aama?hrid=r3",
                "text": "Great curriculum.",
                "rating": 5,
                "time_created": "2024-06-28 12:00:00",
                "user": {
                    "id": "u3",
                    "profile_url": "https://www.yelp.com/user_details?userid=u3",
                    "image_url": null,
                    "name": "Daisy P."
                }
            }
        ],
        "total": 3,
        "possible_languages": ["en"]
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {TEST_KEY}"))
        .unwrap_or(false)
}

fn upstream_reply(headers: &HeaderMap, status: &AtomicU16, body: Value) -> Response {
    if !authorized(headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "code": "TOKEN_INVALID" } })),
        )
            .into_response();
    }

    let status = StatusCode::from_u16(status.load(Ordering::SeqCst)).unwrap();
    if status != StatusCode::OK {
        return (status, Json(json!({ "error": { "code": "UPSTREAM" } }))).into_response();
    }
    Json(body).into_response()
}

async fn upstream_business(State(upstream): State<Upstream>, headers: HeaderMap) -> Response {
    upstream_reply(&headers, &upstream.business_status, upstream_business_body())
}

async fn upstream_reviews(State(upstream): State<Upstream>, headers: HeaderMap) -> Response {
    upstream_reply(&headers, &upstream.reviews_status, upstream_reviews_body())
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_upstream(upstream: Upstream) -> String {
    let router = Router::new()
        .route(
            &format!("/v3/businesses/{TEST_BUSINESS}"),
            get(upstream_business),
        )
        .route(
            &format!("/v3/businesses/{TEST_BUSINESS}/reviews"),
            get(upstream_reviews),
        )
        .with_state(upstream);
    format!("{}/v3", serve(router).await)
}

fn app(gateway: Option<GatewayConfig>) -> Router {
    build_app(ApiConfig {
        bind: "127.0.0.1:0".to_string(),
        allowed_origins: Vec::new(),
        gateway,
    })
    .expect("app should build")
}

fn gateway(base_url: &str, api_key: &str) -> GatewayConfig {
    GatewayConfig::new(api_key, base_url)
        .unwrap()
        .with_business_id(TEST_BUSINESS)
}

fn reviews_request(method: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(REVIEWS_PATH)
        .body(Body::empty())
        .unwrap()
}

fn chat_request(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": text }).to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn keys(value: &Value) -> BTreeSet<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

#[tokio::test]
async fn health_is_public() {
    let response = app(None)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["capabilities"]["reviews_proxy"], false);
}

#[tokio::test]
async fn reviews_preflight_is_empty_with_cors_headers() {
    let response = app(None).oneshot(reviews_request("OPTIONS")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(response.headers());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn reviews_rejects_non_get_methods() {
    for method in ["POST", "PUT", "DELETE"] {
        let response = app(None).oneshot(reviews_request(method)).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_cors_headers(response.headers());
        assert_eq!(json_body(response).await["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn reviews_head_is_rejected_without_calling_upstream() {
    let upstream = Upstream::healthy();
    let base = spawn_upstream(upstream.clone()).await;
    // An unauthorized upstream would turn any forwarded call into a 500.
    upstream.business_status.store(401, Ordering::SeqCst);

    let response = app(Some(gateway(&base, TEST_KEY)))
        .oneshot(reviews_request("HEAD"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors_headers(response.headers());
}

#[tokio::test]
async fn reviews_without_credential_returns_setup_instructions() {
    let response = app(None).oneshot(reviews_request("GET")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(response.headers());
    let parsed = json_body(response).await;
    assert!(parsed["error"]
        .as_str()
        .unwrap()
        .contains("Yelp API key not configured"));
    assert!(parsed["setup_instructions"]
        .as_str()
        .unwrap()
        .contains("yelp.com/developers"));
}

#[tokio::test]
async fn reviews_success_keeps_only_documented_fields() {
    let base = spawn_upstream(Upstream::healthy()).await;
    let response = app(Some(gateway(&base, TEST_KEY)))
        .oneshot(reviews_request("GET"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, s-maxage=300, stale-while-revalidate=600"
    );
    assert_cors_headers(response.headers());

    let parsed = json_body(response).await;
    assert_eq!(
        keys(&parsed["business"]),
        set(&["id", "name", "rating", "review_count", "url"])
    );
    assert_eq!(parsed["business"]["rating"], 5.0);
    assert_eq!(parsed["business"]["review_count"], 9);

    let reviews = parsed["reviews"].as_array().unwrap();
    let upstream = upstream_reviews_body();
    assert_eq!(reviews.len(), upstream["reviews"].as_array().unwrap().len());
    for review in reviews {
        assert_eq!(
            keys(review),
            set(&["id", "rating", "text", "time_created", "url", "user"])
        );
        assert_eq!(
            keys(&review["user"]),
            set(&["image_url", "name"])
        );
    }
    assert_eq!(reviews[1]["user"]["name"], "Richa G.");
    assert_eq!(reviews[1]["rating"], 4);
}

#[tokio::test]
async fn reviews_bad_credential_is_reported_distinctly() {
    let base = spawn_upstream(Upstream::healthy()).await;
    let response = app(Some(gateway(&base, "wrong-key")))
        .oneshot(reviews_request("GET"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let parsed = json_body(response).await;
    assert_eq!(
        parsed["error"],
        "Failed to fetch reviews from Yelp. Please try again later."
    );
    assert!(parsed["details"]
        .as_str()
        .unwrap()
        .contains("Invalid Yelp API key"));
    assert!(parsed["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn reviews_upstream_failures_carry_resource_and_status() {
    let upstream = Upstream::healthy();
    let base = spawn_upstream(upstream.clone()).await;
    let app = app(Some(gateway(&base, TEST_KEY)));

    upstream.reviews_status.store(404, Ordering::SeqCst);
    let response = app.clone().oneshot(reviews_request("GET")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["details"],
        "Reviews not found. Please check the business ID."
    );

    upstream.business_status.store(503, Ordering::SeqCst);
    let response = app.oneshot(reviews_request("GET")).await.unwrap();
    assert_eq!(
        json_body(response).await["details"],
        "Business API error: 503"
    );
}

#[tokio::test]
async fn chat_prefers_higher_priority_topic() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "text": "What are your hours and where are you located?" }).to_string(),
        ))
        .unwrap();

    let response = app(None).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = json_body(response).await;
    assert_eq!(parsed["topic"], "hours");
    assert_eq!(parsed["thinking_delay_ms"], 800);
    assert_eq!(parsed["suggested_follow_ups"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn chat_classifies_like_a_session() {
    for text in ["can I look\naround?", "what  are your hours", "  tour\tplease "] {
        let mut session = ChatSession::new();
        let expected = session.submit(text).unwrap().topic;

        let response = app(None).oneshot(chat_request(text)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["topic"], expected.as_code(), "{text:?}");
    }
}

#[tokio::test]
async fn every_counted_request_records_latency() {
    let app = app(None);
    app.clone().oneshot(reviews_request("GET")).await.unwrap();
    app.clone().oneshot(chat_request("   ")).await.unwrap();
    app.clone().oneshot(chat_request("hours?")).await.unwrap();
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/chat/actions")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "action": "call_now" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let metrics = json_body(response).await["metrics"].clone();
    assert_eq!(metrics["requests_total"], 4);
    assert_eq!(metrics["latency_samples_total"], 4);
}

#[tokio::test]
async fn chat_rejects_blank_text() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": "   " }).to_string()))
        .unwrap();

    let response = app(None).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn chat_actions_dispatch_by_exact_id() {
    let action = |id: &str| {
        Request::builder()
            .method("POST")
            .uri("/v1/chat/actions")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "action": id }).to_string()))
            .unwrap()
    };
    let app = app(None);

    let parsed = json_body(app.clone().oneshot(action("call_now")).await.unwrap()).await;
    assert_eq!(parsed["outcome"], "navigate");
    assert_eq!(parsed["target"]["kind"], "telephone");
    assert_eq!(parsed["target"]["uri"], "tel:5107783220");

    let parsed = json_body(app.oneshot(action("holidays")).await.unwrap()).await;
    assert_eq!(parsed["outcome"], "reply");
    assert!(parsed["text"].as_str().unwrap().contains("rephrase"));
}

#[tokio::test]
async fn view_degrades_when_proxy_is_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}{REVIEWS_PATH}").parse().unwrap();
    let mut view = ReviewsView::new(ProxyClient::new(reqwest::Client::new(), url));

    assert_eq!(view.load().await, ViewState::Degraded);
    assert!(view.is_offline());
    assert_eq!(view.snapshot().business.aggregate_rating, 5.0);
    assert_eq!(view.snapshot().reviews.len(), 6);
}

#[tokio::test]
async fn view_recovers_through_proxy_after_refresh() {
    let upstream = Upstream::healthy();
    upstream.business_status.store(500, Ordering::SeqCst);
    let base = spawn_upstream(upstream.clone()).await;
    let proxy = serve(app(Some(gateway(&base, TEST_KEY)))).await;

    let url = format!("{proxy}{REVIEWS_PATH}").parse().unwrap();
    let mut view = ReviewsView::new(ProxyClient::new(reqwest::Client::new(), url));

    assert_eq!(view.load().await, ViewState::Degraded);
    assert!(view.is_offline());
    assert_eq!(view.snapshot().reviews.len(), 6);

    upstream.business_status.store(200, Ordering::SeqCst);
    assert_eq!(view.refresh().await, ViewState::Ok);
    assert!(!view.is_offline());
    assert_eq!(view.snapshot().business.id, TEST_BUSINESS);
    assert_eq!(view.snapshot().reviews.len(), 3);
}
