pub mod destiny;
pub mod generator;
pub mod matcher;
pub mod parse;
pub mod prompt;
pub mod resolver;
pub mod template;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use generator::{GenerationOptions, GenerativeNarrator, RetryPolicy, TimelineSource};
pub use resolver::NarrativeResolver;
pub use template::{Archetype, TemplateGenerator};
