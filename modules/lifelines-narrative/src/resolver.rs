use std::hash::{DefaultHasher, Hash, Hasher};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use lifelines_common::{GenerationError, LifelinesError, NarrativeResult, Timeline};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::generator::TimelineSource;
use crate::template::TemplateGenerator;
use crate::{destiny, matcher};

/// Three-tier waterfall: special couple → generative source → templates.
///
/// The generative source is tried at most once per request (its own retries
/// are internal to it). Whatever goes wrong there, including a panic, ends in
/// the template path, so only input validation can fail a resolution.
pub struct NarrativeResolver {
    source: Option<Arc<dyn TimelineSource>>,
    templates: TemplateGenerator,
    template_seed: Option<u64>,
}

impl NarrativeResolver {
    pub fn new(source: Arc<dyn TimelineSource>) -> Self {
        Self {
            source: Some(source),
            templates: TemplateGenerator::default(),
            template_seed: None,
        }
    }

    /// No generative backend; every non-special request uses the templates.
    pub fn template_only() -> Self {
        Self {
            source: None,
            templates: TemplateGenerator::default(),
            template_seed: None,
        }
    }

    pub fn with_templates(mut self, templates: TemplateGenerator) -> Self {
        self.templates = templates;
        self
    }

    /// Make template selection reproducible. Each request seeds its own RNG
    /// from this seed and the two names, so the same pair always gets the
    /// same story while different pairs still vary.
    pub fn with_template_seed(mut self, seed: u64) -> Self {
        self.template_seed = Some(seed);
        self
    }

    pub async fn resolve(&self, name1: &str, name2: &str) -> Result<NarrativeResult, LifelinesError> {
        let name1 = name1.trim();
        let name2 = name2.trim();
        if name1.is_empty() || name2.is_empty() {
            return Err(LifelinesError::InvalidInput(
                "请输入两个人的名字".to_string(),
            ));
        }

        if matcher::matches(name1, name2) {
            info!("Special couple matched, serving destiny story");
            return Ok(NarrativeResult::special(destiny::get()));
        }

        let Some(source) = &self.source else {
            return Ok(NarrativeResult::standard(self.fallback(name1, name2)));
        };

        match generate_guarded(source.as_ref(), name1, name2).await {
            Ok(timeline) => {
                info!(events = timeline.len(), "Generated timeline");
                Ok(NarrativeResult::standard(timeline))
            }
            Err(e) => {
                warn!(error = %e, "Generation failed, falling back to template story");
                Ok(NarrativeResult::standard(self.fallback(name1, name2)))
            }
        }
    }

    fn fallback(&self, name1: &str, name2: &str) -> Timeline {
        match self.template_seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(request_seed(seed, name1, name2));
                self.templates.generate_with(&mut rng, name1, name2)
            }
            None => self.templates.generate(name1, name2),
        }
    }
}

fn request_seed(seed: u64, name1: &str, name2: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    name1.hash(&mut hasher);
    name2.hash(&mut hasher);
    hasher.finish()
}

/// Run the source, turning a panic into an ordinary generation failure.
async fn generate_guarded(
    source: &dyn TimelineSource,
    name1: &str,
    name2: &str,
) -> Result<Timeline, GenerationError> {
    match AssertUnwindSafe(source.generate(name1, name2))
        .catch_unwind()
        .await
    {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(GenerationError::Panicked(message))
        }
    }
}
