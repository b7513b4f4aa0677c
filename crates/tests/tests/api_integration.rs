use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use wayfarer_agents::TripPlanner;
use wayfarer_api::{build_router, ApiState};
use wayfarer_core::{ChatRole, ERROR_MARKER, NO_RESPONSE_TEXT, SUCCESS_BANNER, SYSTEM_INSTRUCTION};
use wayfarer_observability::AppMetrics;
use wayfarer_tests::{fixed_today, ScriptedModel, ScriptedReply};

fn app_with(model: Arc<ScriptedModel>) -> Router {
    let metrics = AppMetrics::shared();
    build_router(ApiState {
        planner: TripPlanner::new(model, metrics.clone()),
        metrics,
        allowed_origins: Arc::new(vec!["http://localhost:3000".to_string()]),
        today: fixed_today,
    })
}

fn itinerary_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/itinerary")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_model_and_counters() {
    let app = app_with(ScriptedModel::text("unused"));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    let parsed = json_body(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["model"], "scripted-model");
    assert_eq!(parsed["metrics"]["submissions_total"], 0);
}

#[tokio::test]
async fn form_schema_lists_fields() {
    let app = app_with(ScriptedModel::text("unused"));

    let response = app
        .oneshot(Request::builder().uri("/v1/form").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["fields"].as_array().unwrap().len(), 8);
    assert_eq!(parsed["fields"][2]["control"]["options"][0], "ALL");
    assert_eq!(parsed["submit_label"], "🔎 Get Travel Suggestions");
}

#[tokio::test]
async fn valid_trip_returns_itinerary() {
    let model = ScriptedModel::text("Day 1: Kumartuli\n🌞 Morning : clay idols");
    let app = app_with(model.clone());

    let response = app
        .oneshot(itinerary_request(json!({
            "source": "Delhi",
            "destination": "Kolkata",
            "interest": "Culture",
            "budget": 5000,
            "start_date": "2030-04-08",
            "end_date": "2030-04-10",
            "meal_preference": "Vegetarian",
            "special_requirements": ""
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(parsed["warnings"], json!([]));
    assert_eq!(parsed["banner"], SUCCESS_BANNER);
    assert!(parsed["itinerary"]
        .as_str()
        .unwrap()
        .starts_with("Day 1: Kumartuli"));

    let calls = model.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].role, ChatRole::System);
    assert_eq!(calls[0][0].content, SYSTEM_INSTRUCTION);
    let user = &calls[0][1].content;
    for needle in ["Delhi", "Kolkata", "Vegetarian", "Culture", "None", "5000"] {
        assert!(user.contains(needle), "user instruction missing {needle}");
    }
}

#[tokio::test]
async fn blank_source_is_rejected_without_call() {
    let model = ScriptedModel::text("unused");
    let app = app_with(model.clone());

    let response = app
        .oneshot(itinerary_request(json!({
            "source": "",
            "destination": "Kolkata",
            "start_date": "2030-04-08",
            "end_date": "2030-04-10"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    assert_eq!(
        parsed["warnings"],
        json!(["Please enter both departure and destination locations."])
    );
    assert!(parsed["itinerary"].is_null());
    assert!(parsed["banner"].is_null());
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn past_start_date_warns_and_still_generates() {
    let model = ScriptedModel::text("Day 1");
    let app = app_with(model.clone());

    let response = app
        .oneshot(itinerary_request(json!({
            "source": "Delhi",
            "destination": "Kolkata",
            "start_date": "2030-03-31",
            "end_date": "2030-04-02"
        })))
        .await
        .unwrap();

    let parsed = json_body(response).await;
    assert_eq!(
        parsed["warnings"],
        json!(["Start date cannot be in the past."])
    );
    assert_eq!(parsed["itinerary"], "Day 1");
    assert_eq!(model.calls().len(), 1);
}

#[tokio::test]
async fn model_failure_is_returned_as_text() {
    let model = ScriptedModel::new(ScriptedReply::Fail("quota exhausted".to_string()));
    let app = app_with(model);

    let response = app
        .oneshot(itinerary_request(json!({
            "source": "Delhi",
            "destination": "Kolkata",
            "start_date": "2030-04-08",
            "end_date": "2030-04-08"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = json_body(response).await;
    let text = parsed["itinerary"].as_str().unwrap();
    assert!(text.starts_with(ERROR_MARKER));
    assert!(text.contains("quota exhausted"));
}

#[tokio::test]
async fn empty_model_reply_uses_fallback() {
    let app = app_with(ScriptedModel::new(ScriptedReply::Empty));

    let response = app
        .oneshot(itinerary_request(json!({
            "source": "Delhi",
            "destination": "Kolkata",
            "start_date": "2030-04-08",
            "end_date": "2030-04-08"
        })))
        .await
        .unwrap();

    let parsed = json_body(response).await;
    assert_eq!(parsed["itinerary"], NO_RESPONSE_TEXT);
}

#[tokio::test]
async fn unknown_option_is_a_client_error() {
    let model = ScriptedModel::text("unused");
    let app = app_with(model.clone());

    let response = app
        .oneshot(itinerary_request(json!({
            "source": "Delhi",
            "destination": "Kolkata",
            "meal_preference": "Keto",
            "start_date": "2030-04-08",
            "end_date": "2030-04-08"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let parsed = json_body(response).await;
    assert_eq!(parsed["error"], "invalid_trip_request");
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn negative_budget_is_a_client_error() {
    let app = app_with(ScriptedModel::text("unused"));

    let response = app
        .oneshot(itinerary_request(json!({
            "source": "Delhi",
            "destination": "Kolkata",
            "budget": -500,
            "start_date": "2030-04-08",
            "end_date": "2030-04-08"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
