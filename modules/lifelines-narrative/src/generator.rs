use std::sync::Arc;
use std::time::Duration;

use ai_client::{AiError, CompletionRequest, TextCompletion};
use async_trait::async_trait;
use lifelines_common::{Config, GenerationError, Timeline};
use tracing::{debug, error, info, warn};

use crate::parse::parse_timeline;
use crate::prompt;

// ---------------------------------------------------------------------------
// TimelineSource
// ---------------------------------------------------------------------------

/// Anything that can attempt to write a timeline for two people.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    async fn generate(&self, name1: &str, name2: &str) -> Result<Timeline, GenerationError>;
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Fixed-delay retry for transient completion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub retry: RetryPolicy,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 2000,
            retry: RetryPolicy::default(),
        }
    }
}

impl GenerationOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            retry: RetryPolicy {
                max_attempts: config.llm_max_retries.max(1),
                delay: config.llm_retry_delay,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// GenerativeNarrator
// ---------------------------------------------------------------------------

/// LLM-backed timeline source. Each call builds fresh prompts and hits the
/// completion backend; nothing is cached.
pub struct GenerativeNarrator {
    completion: Arc<dyn TextCompletion>,
    options: GenerationOptions,
    system_prompt: String,
}

impl GenerativeNarrator {
    pub fn new(completion: Arc<dyn TextCompletion>, options: GenerationOptions) -> Self {
        Self {
            completion,
            options,
            system_prompt: prompt::system_prompt(),
        }
    }

    /// Call the backend until it returns text, a non-retryable failure, or the
    /// attempt budget runs out.
    async fn complete_with_retry(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        let RetryPolicy {
            max_attempts,
            delay,
        } = self.options.retry;
        let max_attempts = max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.completion.complete(request).await {
                Ok(text) => {
                    debug!(attempt, chars = text.chars().count(), "Completion received");
                    return Ok(text);
                }
                Err(e) => {
                    let failure = classify(e);
                    warn!(attempt, max_attempts, error = %failure, "Completion attempt failed");

                    if !failure.is_retryable() {
                        return Err(failure);
                    }
                    last_error = failure.to_string();

                    if attempt < max_attempts {
                        info!(delay_secs = delay.as_secs_f32(), "Retrying completion");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        error!(attempts = max_attempts, "Completion attempts exhausted");
        Err(GenerationError::Exhausted {
            attempts: max_attempts,
            last: last_error,
        })
    }
}

/// Map a backend failure onto the retry policy's vocabulary. Quota and
/// rate-limit detection lives in [`AiError::is_rate_limited`].
///
/// Only a well-formed reply without completion text is final. A malformed
/// provider envelope is retried like any other provider fault.
fn classify(err: AiError) -> GenerationError {
    if err.is_rate_limited() {
        return GenerationError::Quota(err.to_string());
    }
    match err {
        AiError::Parse(msg) => GenerationError::Parse(msg),
        other => GenerationError::Transient(other.to_string()),
    }
}

#[async_trait]
impl TimelineSource for GenerativeNarrator {
    async fn generate(&self, name1: &str, name2: &str) -> Result<Timeline, GenerationError> {
        let request = CompletionRequest::new(&self.system_prompt, prompt::user_prompt(name1, name2))
            .temperature(self.options.temperature)
            .max_tokens(self.options.max_tokens);

        let raw = self.complete_with_retry(&request).await?;
        parse_timeline(&raw)
    }
}
