use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use chrono::NaiveDate;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use wayfarer_agents::TripPlanner;
use wayfarer_core::{trip_form, TripRequest};
use wayfarer_llm::{GeminiClient, ModelSettings};
use wayfarer_observability::AppMetrics;

const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
pub struct ApiState {
    pub planner: TripPlanner,
    pub metrics: Arc<AppMetrics>,
    pub allowed_origins: Arc<Vec<String>>,
    /// Date used for the past-start-date check.
    pub today: fn() -> NaiveDate,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    model: String,
    metrics: wayfarer_observability::MetricsSnapshot,
}

pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Builds the router from validated settings. Settings are loaded (and a
/// missing key rejected) by the caller before this runs.
pub fn build_app(settings: &ModelSettings) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let model = GeminiClient::new(settings).context("failed to build Gemini client")?;
    let planner = TripPlanner::new(Arc::new(model), metrics.clone());

    Ok(build_router(ApiState {
        planner,
        metrics,
        allowed_origins: Arc::new(parse_allowed_origins()),
        today: local_today,
    }))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/form", get(form_schema))
        .route("/v1/itinerary", post(submit_itinerary))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        model: state.planner.model_id().to_string(),
        metrics: state.metrics.snapshot(),
    })
}

async fn form_schema() -> impl IntoResponse {
    Json(trip_form())
}

async fn submit_itinerary(
    State(state): State<ApiState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(serde_json::json!({
                    "error": "invalid_trip_request",
                    "message": rejection.body_text()
                })),
            )
                .into_response();
        }
    };

    let submission = state.planner.submit(&request, (state.today)()).await;
    (StatusCode::OK, Json(submission)).into_response()
}

fn parse_allowed_origins() -> Vec<String> {
    let default_origins = [
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "http://localhost:8501",
        "http://127.0.0.1:8501",
    ];

    env::var("WAYFARER_ALLOWED_ORIGINS")
        .ok()
        .map(|value| split_origins(&value))
        .unwrap_or_else(|| {
            default_origins
                .iter()
                .map(|value| value.trim_end_matches('/').to_string())
                .collect()
        })
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:3000")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
