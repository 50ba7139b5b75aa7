use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The provider answered, but not with a chat-completions envelope.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// The envelope was fine but carried no usable completion text.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Substrings providers put in quota / throttling error bodies.
const RATE_LIMIT_MARKERS: &[&str] = &["rate limit", "rate_limit", "quota", "insufficient_quota"];

impl AiError {
    /// Whether retrying the same request is pointless because the provider
    /// is throttling us or the account is out of quota.
    ///
    /// Structured signals win: an explicit `RateLimited` or HTTP 429. Otherwise
    /// falls back to scanning the error text for known provider phrasing.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            AiError::RateLimited(_) => true,
            AiError::Api { status: 429, .. } => true,
            other => {
                let text = other.to_string().to_lowercase();
                RATE_LIMIT_MARKERS.iter().any(|m| text.contains(m))
            }
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) if status.as_u16() == 429 => AiError::RateLimited(e.to_string()),
            Some(status) => AiError::Api {
                status: status.as_u16(),
                message: e.to_string(),
            },
            None => AiError::Network(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(e: serde_json::Error) -> Self {
        AiError::InvalidResponse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_is_rate_limited() {
        let err = AiError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn quota_text_is_rate_limited() {
        let err = AiError::Api {
            status: 403,
            message: r#"{"error":{"code":"insufficient_quota"}}"#.to_string(),
        };
        assert!(err.is_rate_limited());

        let err = AiError::Network("Rate Limit reached for requests".to_string());
        assert!(err.is_rate_limited());
    }

    #[test]
    fn server_errors_are_not_rate_limited() {
        let err = AiError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert!(!AiError::Network("connection reset".to_string()).is_rate_limited());
        assert!(!AiError::Parse("expected value".to_string()).is_rate_limited());
    }
}
