//! Generative narrator over the real OpenAI client, against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use ai_client::OpenAi;
use lifelines_common::GenerationError;
use lifelines_narrative::testing::valid_timeline_json;
use lifelines_narrative::{GenerationOptions, GenerativeNarrator, RetryPolicy, TimelineSource};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn narrator(server: &MockServer) -> GenerativeNarrator {
    let openai = OpenAi::new("sk-test", "gpt-4o-2024-08-06")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5));
    let options = GenerationOptions {
        retry: RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        },
        ..GenerationOptions::default()
    };
    GenerativeNarrator::new(Arc::new(openai), options)
}

fn chat_reply(content: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

fn gateway_page() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string("<html>upstream timed out</html>")
}

async fn hits(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gateway_page_is_retried_until_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(gateway_page())
        .mount(&server)
        .await;

    let err = narrator(&server).generate("Alice", "Bob").await.unwrap_err();

    assert!(matches!(err, GenerationError::Exhausted { attempts: 3, .. }), "{err:?}");
    assert_eq!(hits(&server).await, 3);
}

#[tokio::test]
async fn gateway_page_then_valid_reply_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(gateway_page())
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_reply(valid_timeline_json(9)))
        .mount(&server)
        .await;

    let timeline = narrator(&server).generate("Alice", "Bob").await.unwrap();

    assert_eq!(timeline.len(), 9);
    assert_eq!(hits(&server).await, 2);
}

#[tokio::test]
async fn status_429_aborts_after_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit reached"))
        .mount(&server)
        .await;

    let err = narrator(&server).generate("Alice", "Bob").await.unwrap_err();

    assert!(matches!(err, GenerationError::Quota(_)), "{err:?}");
    assert_eq!(hits(&server).await, 1);
}

#[tokio::test]
async fn prose_reply_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_reply("抱歉，我无法完成这个请求。".to_string()))
        .mount(&server)
        .await;

    let err = narrator(&server).generate("Alice", "Bob").await.unwrap_err();

    assert!(matches!(err, GenerationError::Parse(_)), "{err:?}");
    assert_eq!(hits(&server).await, 1);
}
