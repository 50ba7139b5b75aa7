//! In-process HTTP tests: the real router over a scripted completion backend.

use std::sync::Arc;
use std::time::Duration;

use ai_client::AiError;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lifelines_api::{build_router, AppState};
use lifelines_common::{NarrativeResult, Theme};
use lifelines_narrative::testing::{valid_timeline_json, ScriptedCompletion};
use lifelines_narrative::{
    GenerationOptions, GenerativeNarrator, NarrativeResolver, RetryPolicy, TemplateGenerator,
};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app_over(script: &Arc<ScriptedCompletion>, origins: &[String]) -> Router {
    let options = GenerationOptions {
        retry: RetryPolicy {
            max_attempts: 2,
            delay: Duration::ZERO,
        },
        ..GenerationOptions::default()
    };
    let narrator = GenerativeNarrator::new(script.clone(), options);
    let resolver =
        NarrativeResolver::new(Arc::new(narrator)).with_templates(TemplateGenerator::new(2026));
    build_router(AppState::new(resolver), origins)
}

fn predict(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict_story")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_endpoints_respond() {
    let app = app_over(&Arc::new(ScriptedCompletion::new()), &[]);

    let response = app
        .clone()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "LifeLines API is running");
}

// ---------------------------------------------------------------------------
// Predict
// ---------------------------------------------------------------------------

#[tokio::test]
async fn special_couple_gets_destiny() {
    let app = app_over(&Arc::new(ScriptedCompletion::new()), &[]);
    let response = app
        .oneshot(predict(serde_json::json!({"name1": "李梦祥", "name2": "李彦"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["is_special"], true);
    assert_eq!(json["theme"], "destiny");
    assert_eq!(json["events"].as_array().unwrap().len(), 12);
    assert_eq!(json["events"][0]["year"], 2018);
    assert_eq!(json["events"][0]["distance"], 3);
}

#[tokio::test]
async fn generated_story_round_trips() {
    let script = Arc::new(ScriptedCompletion::new().then_ok(valid_timeline_json(9)));
    let response = app_over(&script, &[])
        .oneshot(predict(serde_json::json!({"name1": "Alice", "name2": "Bob"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let result: NarrativeResult = serde_json::from_value(body_json(response).await).unwrap();
    assert!(!result.is_special);
    assert_eq!(result.theme, Theme::Default);
    assert_eq!(result.timeline.len(), 9);
}

#[tokio::test]
async fn backend_outage_still_returns_200() {
    let script = Arc::new(ScriptedCompletion::always_err(|| AiError::Api {
        status: 500,
        message: "internal error".into(),
    }));
    let response = app_over(&script, &[])
        .oneshot(predict(serde_json::json!({"name1": "Alice", "name2": "Bob"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: NarrativeResult = serde_json::from_value(body_json(response).await).unwrap();
    assert!(!result.is_special);
    assert!((6..=7).contains(&result.timeline.len()));
    assert_eq!(script.calls(), 2);
}

#[tokio::test]
async fn blank_name_is_a_400_with_detail() {
    let script = Arc::new(ScriptedCompletion::new());
    let response = app_over(&script, &[])
        .oneshot(predict(serde_json::json!({"name1": "   ", "name2": "Bob"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(!json["detail"].as_str().unwrap().is_empty());
    assert_eq!(script.calls(), 0);
}

#[tokio::test]
async fn unknown_fields_are_ignored() {
    let script = Arc::new(ScriptedCompletion::new().then_ok(valid_timeline_json(8)));
    let response = app_over(&script, &[])
        .oneshot(predict(
            serde_json::json!({"name1": "Alice", "name2": "Bob", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_field_is_a_client_error() {
    let response = app_over(&Arc::new(ScriptedCompletion::new()), &[])
        .oneshot(predict(serde_json::json!({"name1": "Alice"})))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_is_open_without_an_allow_list() {
    let response = app_over(&Arc::new(ScriptedCompletion::new()), &[])
        .oneshot(
            Request::get("/api/health")
                .header(header::ORIGIN, "https://anywhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn cors_allow_list_is_enforced() {
    let origins = vec!["https://lifelines.app".to_string()];
    let app = app_over(&Arc::new(ScriptedCompletion::new()), &origins);

    let allowed = app
        .clone()
        .oneshot(
            Request::get("/api/health")
                .header(header::ORIGIN, "https://lifelines.app")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://lifelines.app"
    );

    let denied = app
        .oneshot(
            Request::get("/api/health")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(denied
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
