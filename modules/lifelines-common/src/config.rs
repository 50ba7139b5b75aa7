use std::time::Duration;

use anyhow::{anyhow, Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    // AI / LLM
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub llm_max_retries: u32,
    pub llm_retry_delay: Duration,
    pub llm_timeout: Duration,

    // Templates
    pub template_seed: Option<u64>,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // CORS
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment. Callers merge any
    /// `.env` file first.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Missing `OPENAI_API_KEY` and
    /// unparseable numbers are errors; everything else has a default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY")
            .ok_or_else(|| anyhow!("OPENAI_API_KEY environment variable is required"))?;

        let mut allowed_origins: Vec<String> = get("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(frontend) = get("FRONTEND_URL") {
            let frontend = frontend.trim().to_string();
            if !allowed_origins.is_empty() && !allowed_origins.contains(&frontend) {
                allowed_origins.push(frontend);
            }
        }

        let llm_max_retries: u32 = parse_or(&get, "LLM_MAX_RETRIES", 3)?;
        if llm_max_retries == 0 {
            return Err(anyhow!("LLM_MAX_RETRIES must be at least 1"));
        }

        Ok(Self {
            openai_api_key,
            openai_base_url: get("OPENAI_BASE_URL"),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| "gpt-4o-2024-08-06".to_string()),
            llm_temperature: parse_or(&get, "LLM_TEMPERATURE", 0.8)?,
            llm_max_tokens: parse_or(&get, "LLM_MAX_TOKENS", 2000)?,
            llm_max_retries,
            llm_retry_delay: Duration::from_secs(parse_or(&get, "LLM_RETRY_DELAY_SECS", 3)?),
            llm_timeout: Duration::from_secs(parse_or(&get, "LLM_TIMEOUT_SECS", 60)?),
            template_seed: get("TEMPLATE_SEED")
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .context("TEMPLATE_SEED must be an unsigned integer")?,
            web_host: get("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port: parse_or(&get, "WEB_PORT", 8000)?,
            allowed_origins,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("llm_max_retries", &self.llm_max_retries)
            .field("llm_retry_delay", &self.llm_retry_delay)
            .field("llm_timeout", &self.llm_timeout)
            .field("template_seed", &self.template_seed)
            .field("web_host", &self.web_host)
            .field("web_port", &self.web_port)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}
