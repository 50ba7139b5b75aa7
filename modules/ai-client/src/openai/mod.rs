mod client;
pub(crate) mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AiError;
use crate::traits::{CompletionRequest, TextCompletion};

use client::{OpenAiClient, OPENAI_API_URL};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// =============================================================================
// OpenAi
// =============================================================================

/// Chat-completions client for OpenAI and OpenAI-compatible gateways.
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    model: String,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            http: build_http(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = build_http(timeout);
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> OpenAiClient<'_> {
        OpenAiClient::new(
            &self.api_key,
            &self.http,
            self.base_url.as_deref().unwrap_or(OPENAI_API_URL),
        )
    }
}

fn build_http(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

// =============================================================================
// TextCompletion Implementation
// =============================================================================

#[async_trait]
impl TextCompletion for OpenAi {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let mut wire = types::ChatRequest::new(&self.model)
            .message(types::WireMessage::system(&request.system))
            .message(types::WireMessage::user(&request.user));
        if let Some(temperature) = request.temperature {
            wire = wire.temperature(temperature);
        }
        if let Some(limit) = request.max_tokens {
            wire = wire.output_limit(limit);
        }

        let response = self.client().chat(&wire).await?;

        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "OpenAI usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::InvalidResponse("No choices in response".into()))?;

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(AiError::Parse(format!(
                "Empty response from OpenAI (finish_reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}
