use std::sync::Arc;

use ai_client::OpenAi;
use anyhow::Result;
use lifelines_common::Config;
use lifelines_narrative::{GenerationOptions, GenerativeNarrator, NarrativeResolver};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifelines_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    info!(?config, "Loaded configuration");

    let mut openai = OpenAi::new(&config.openai_api_key, &config.llm_model)
        .with_timeout(config.llm_timeout);
    if let Some(base_url) = &config.openai_base_url {
        openai = openai.with_base_url(base_url);
    }

    let narrator = GenerativeNarrator::new(
        Arc::new(openai),
        GenerationOptions::from_config(&config),
    );
    let mut resolver = NarrativeResolver::new(Arc::new(narrator));
    if let Some(seed) = config.template_seed {
        resolver = resolver.with_template_seed(seed);
    }

    let app = build_router(AppState::new(resolver), &config.allowed_origins);

    let addr = config.bind_addr();
    info!("LifeLines API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
