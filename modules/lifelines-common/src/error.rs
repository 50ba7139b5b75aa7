use thiserror::Error;

/// Errors surfaced to callers of the narrative pipeline.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LifelinesError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A timeline that fails its structural contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("timeline has {len} events, expected between {min} and {max}")]
    Length { len: usize, min: usize, max: usize },

    #[error("event {index}: {reason}")]
    Event { index: usize, reason: String },
}

/// Why the generative path produced no usable timeline.
///
/// None of these reach the HTTP caller; the resolver turns every one of them
/// into a template fallback.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Transient generation failure: {0}")]
    Transient(String),

    #[error("Provider quota or rate limit hit: {0}")]
    Quota(String),

    #[error("Unparseable generation output: {0}")]
    Parse(String),

    #[error("Generated timeline violates schema: {0}")]
    Schema(#[from] TimelineError),

    #[error("Generation failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },

    #[error("Generation panicked: {0}")]
    Panicked(String),
}

impl GenerationError {
    /// Whether another attempt within the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::Transient(_))
    }
}
