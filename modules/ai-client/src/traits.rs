use async_trait::async_trait;

use crate::error::AiError;

// =============================================================================
// Completion Request
// =============================================================================

/// A single-shot prompt: one system instruction, one user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

// =============================================================================
// TextCompletion Trait
// =============================================================================

/// Dyn-compatible text generation capability.
///
/// Implementations return the raw assistant text. Failures are classified
/// through [`AiError::is_rate_limited`] so callers can decide whether a retry
/// is worthwhile.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;
}
