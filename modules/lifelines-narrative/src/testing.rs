// Test doubles for the narrative pipeline.
//
// - ScriptedCompletion (TextCompletion): replays queued responses, counts calls
// - FixedSource / FailingSource / PanickingSource (TimelineSource)
//
// Plus valid_timeline_json() for building well-formed model output.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ai_client::{AiError, CompletionRequest, TextCompletion};
use async_trait::async_trait;
use lifelines_common::{GenerationError, Timeline};

use crate::generator::TimelineSource;

// ---------------------------------------------------------------------------
// ScriptedCompletion
// ---------------------------------------------------------------------------

type Responder = Box<dyn Fn() -> Result<String, AiError> + Send + Sync>;

/// Completion backend that answers from a queue, then from an optional
/// fallback responder. Without a fallback an exhausted script is a network error.
pub struct ScriptedCompletion {
    script: Mutex<VecDeque<Result<String, AiError>>>,
    fallback: Option<Responder>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl Default for ScriptedCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn always_ok(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            fallback: Some(Box::new(move || Ok(text.clone()))),
            ..Self::new()
        }
    }

    pub fn always_err(make: impl Fn() -> AiError + Send + Sync + 'static) -> Self {
        Self {
            fallback: Some(Box::new(move || Err(make()))),
            ..Self::new()
        }
    }

    pub fn then_ok(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()))
    }

    pub fn then_err(self, err: AiError) -> Self {
        self.push(Err(err))
    }

    fn push(self, response: Result<String, AiError>) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .expect("request lock poisoned")
            .clone()
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("request lock poisoned") = Some(request.clone());

        let next = self.script.lock().expect("script lock poisoned").pop_front();
        match (next, &self.fallback) {
            (Some(response), _) => response,
            (None, Some(responder)) => responder(),
            (None, None) => Err(AiError::Network(
                "ScriptedCompletion: script exhausted".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// TimelineSource doubles
// ---------------------------------------------------------------------------

/// Always returns the same timeline.
pub struct FixedSource(pub Timeline);

#[async_trait]
impl TimelineSource for FixedSource {
    async fn generate(&self, _name1: &str, _name2: &str) -> Result<Timeline, GenerationError> {
        Ok(self.0.clone())
    }
}

/// Always fails with the error produced by the closure.
pub struct FailingSource {
    make: Box<dyn Fn() -> GenerationError + Send + Sync>,
    calls: AtomicUsize,
}

impl FailingSource {
    pub fn new(make: impl Fn() -> GenerationError + Send + Sync + 'static) -> Self {
        Self {
            make: Box::new(make),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TimelineSource for FailingSource {
    async fn generate(&self, _name1: &str, _name2: &str) -> Result<Timeline, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.make)())
    }
}

/// Panics inside the generation future.
pub struct PanickingSource;

#[async_trait]
impl TimelineSource for PanickingSource {
    async fn generate(&self, _name1: &str, _name2: &str) -> Result<Timeline, GenerationError> {
        panic!("PanickingSource: generation blew up");
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Well-formed model output with `n` events, 2010 onwards.
pub fn valid_timeline_json(n: usize) -> String {
    let events: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "year": 2010 + i,
                "event": format!("Chapter {} of a shared life", i + 1),
                "distance": (80usize).saturating_sub(i * 7),
                "emotion_score": (i % 11),
                "phase": format!("phase {}", i + 1),
            })
        })
        .collect();
    serde_json::to_string(&events).expect("fixture serializes")
}
