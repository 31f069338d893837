use std::env;
use std::sync::Arc;
use std::time::Instant;

use aama_core::intent::is_blank;
use aama_core::{dispatch, respond, ChatReply, Topic, THINKING_DELAY};
use aama_observability::{AppMetrics, MetricsSnapshot};
use aama_reviews::config::API_KEY_VAR;
use aama_reviews::{ConfigError, GatewayConfig, YelpGateway, SETUP_INSTRUCTIONS};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub const REVIEWS_PATH: &str = "/api/yelp-reviews";
pub const REVIEWS_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";
const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch reviews from Yelp. Please try again later.";
const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub allowed_origins: Vec<String>,
    /// `None` when the reviews credential is absent; the proxy then answers
    /// with setup instructions instead of calling upstream.
    pub gateway: Option<GatewayConfig>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let gateway = match GatewayConfig::from_env() {
            Ok(config) => Some(config),
            Err(err @ ConfigError::MissingCredential { .. }) => {
                warn!(error = %err, "reviews proxy disabled until the credential is configured");
                None
            }
            Err(err) => return Err(err).context("invalid reviews gateway configuration"),
        };

        Ok(Self {
            bind: env::var("AAMA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            allowed_origins: parse_allowed_origins(),
            gateway,
        })
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub metrics: Arc<AppMetrics>,
    pub gateway: Option<Arc<YelpGateway>>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
    capabilities: HealthCapabilities,
}

#[derive(Debug, Serialize)]
struct HealthCapabilities {
    reviews_proxy: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    #[serde(flatten)]
    reply: ChatReply,
    thinking_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct ActionRequest {
    action: String,
}

pub fn build_app(config: ApiConfig) -> Result<Router> {
    let gateway = config
        .gateway
        .map(YelpGateway::new)
        .transpose()
        .context("failed to build reviews gateway HTTP client")?
        .map(Arc::new);

    let state = ApiState {
        metrics: AppMetrics::shared(),
        gateway,
    };

    Ok(build_router(state, &config.allowed_origins))
}

pub fn build_router(state: ApiState, allowed_origins: &[String]) -> Router {
    let chat_routes = Router::new()
        .route("/v1/chat", post(chat))
        .route("/v1/chat/actions", post(chat_action))
        .layer(build_cors_layer(allowed_origins));

    Router::new()
        .route("/health", get(health))
        .route(REVIEWS_PATH, reviews_method_router())
        .merge(chat_routes)
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

fn reviews_method_router() -> MethodRouter<ApiState> {
    get(yelp_reviews)
        .head(method_not_allowed)
        .options(reviews_preflight)
        .fallback(method_not_allowed)
        .layer(middleware::from_fn(reviews_cors_headers))
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        capabilities: HealthCapabilities {
            reviews_proxy: state.gateway.is_some(),
        },
    };
    (StatusCode::OK, Json(payload))
}

async fn yelp_reviews(State(state): State<ApiState>) -> impl IntoResponse {
    let started = Instant::now();
    state.metrics.inc_request();
    let response = serve_reviews(&state).await;
    state.metrics.observe_latency(started.elapsed());
    response
}

async fn serve_reviews(state: &ApiState) -> Response {
    let Some(gateway) = state.gateway.as_ref() else {
        let err = ConfigError::MissingCredential { var: API_KEY_VAR };
        error!(error = %err, "reviews request rejected");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": err.to_string(),
                "setup_instructions": SETUP_INSTRUCTIONS,
            })),
        )
            .into_response();
    };

    state.metrics.inc_upstream_fetch();
    match gateway.fetch_snapshot().await {
        Ok(payload) => {
            info!(
                business_id = %gateway.business_id(),
                reviews = payload.reviews.len(),
                "reviews served"
            );
            (
                StatusCode::OK,
                [(header::CACHE_CONTROL, REVIEWS_CACHE_CONTROL)],
                Json(payload),
            )
                .into_response()
        }
        Err(err) => {
            state.metrics.inc_upstream_failure();
            error!(error = %err, business_id = %gateway.business_id(), "reviews upstream failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": UPSTREAM_FAILURE_MESSAGE,
                    "details": err.to_string(),
                    "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                })),
            )
                .into_response()
        }
    }
}

async fn reviews_preflight() -> impl IntoResponse {
    StatusCode::OK
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}

async fn chat(State(state): State<ApiState>, Json(request): Json<ChatRequest>) -> impl IntoResponse {
    let started = Instant::now();
    state.metrics.inc_request();

    let response = if is_blank(&request.text) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": "empty_message",
                "message": "text must contain at least one non-whitespace character",
            })),
        )
            .into_response()
    } else {
        let reply = respond(&request.text);
        state.metrics.inc_chat_reply(reply.topic == Topic::Fallback);
        info!(topic = reply.topic.as_code(), "chat handled");
        (
            StatusCode::OK,
            Json(ChatResponse {
                reply,
                thinking_delay_ms: THINKING_DELAY.as_millis() as u64,
            }),
        )
            .into_response()
    };

    state.metrics.observe_latency(started.elapsed());
    response
}

async fn chat_action(
    State(state): State<ApiState>,
    Json(request): Json<ActionRequest>,
) -> impl IntoResponse {
    let started = Instant::now();
    state.metrics.inc_request();
    let outcome = dispatch(request.action.trim());
    info!(action = %request.action, "quick reply dispatched");
    state.metrics.observe_latency(started.elapsed());
    (StatusCode::OK, Json(outcome))
}

/// The reviews endpoint is public: every response, errors included, carries
/// the same permissive CORS headers.
async fn reviews_cors_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:5173")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

fn parse_allowed_origins() -> Vec<String> {
    env::var("AAMA_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
