use crate::api::endpoints;
use crate::error::AppError;
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;

pub const DEFAULT_REGION: &str = "euw1";
pub const DEFAULT_DDRAGON_VERSION: &str = "14.25.1";
pub const MAX_CONCURRENCY: usize = 5;

// Riot development key limits.
const DEFAULT_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => panic!("zero request budget"),
};
const DEFAULT_REQUESTS_PER_TWO_MINUTES: NonZeroU32 = match NonZeroU32::new(100) {
    Some(n) => n,
    None => panic!("zero request budget"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

impl FromStr for LlmProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "gpt" => Ok(LlmProvider::OpenAi),
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            other => Err(AppError::ConfigError(format!(
                "unknown LLM_PROVIDER '{}' (expected openai or anthropic)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Platform id, e.g. `euw1`.
    pub region: String,
    pub concurrency: usize,
    pub requests_per_second: NonZeroU32,
    pub requests_per_two_minutes: NonZeroU32,
    pub ddragon_version: String,
    pub llm_provider: LlmProvider,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl Config {
    pub fn new(api_key: impl Into<String>, region: &str) -> Result<Self, AppError> {
        Ok(Config {
            api_key: api_key.into(),
            region: endpoints::platform_id(region)?.to_string(),
            concurrency: MAX_CONCURRENCY,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            requests_per_two_minutes: DEFAULT_REQUESTS_PER_TWO_MINUTES,
            ddragon_version: DEFAULT_DDRAGON_VERSION.to_string(),
            llm_provider: LlmProvider::OpenAi,
            openai_api_key: None,
            anthropic_api_key: None,
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").map_err(|_| {
            AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
        })?;

        let region = env::var("RIOT_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let mut config = Config::new(api_key, &region)?;

        if let Ok(raw) = env::var("SCOUT_CONCURRENCY") {
            config.set_concurrency(parse_number("SCOUT_CONCURRENCY", &raw)?);
        }
        if let Ok(raw) = env::var("RIOT_REQUESTS_PER_SECOND") {
            config.requests_per_second = parse_budget("RIOT_REQUESTS_PER_SECOND", &raw)?;
        }
        if let Ok(raw) = env::var("RIOT_REQUESTS_PER_TWO_MINUTES") {
            config.requests_per_two_minutes = parse_budget("RIOT_REQUESTS_PER_TWO_MINUTES", &raw)?;
        }
        if let Ok(version) = env::var("DDRAGON_VERSION") {
            config.ddragon_version = version;
        }
        if let Ok(provider) = env::var("LLM_PROVIDER") {
            config.llm_provider = provider.parse()?;
        }
        config.openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        config.anthropic_api_key = env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty());

        Ok(config)
    }

    pub fn set_region(&mut self, region: &str) -> Result<(), AppError> {
        self.region = endpoints::platform_id(region)?.to_string();
        Ok(())
    }

    /// Clamped to `1..=MAX_CONCURRENCY` so the shared rate budget is not drained by one scout.
    pub fn set_concurrency(&mut self, concurrency: usize) {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
    }
}

fn parse_number(name: &str, raw: &str) -> Result<usize, AppError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| AppError::ConfigError(format!("{} must be a positive integer, got '{}'", name, raw)))
}

fn parse_budget(name: &str, raw: &str) -> Result<NonZeroU32, AppError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| AppError::ConfigError(format!("{} must be a non-zero integer, got '{}'", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_region_names_resolve_to_platform_ids() {
        let config = Config::new("key", "EUW").unwrap();
        assert_eq!(config.region, "euw1");
        assert_eq!(endpoints::regional_routing(&config.region), "europe");

        let config = Config::new("key", "na1").unwrap();
        assert_eq!(config.region, "na1");
        assert_eq!(endpoints::regional_routing(&config.region), "americas");
    }

    #[test]
    fn unknown_region_is_a_config_error() {
        assert!(matches!(Config::new("key", "moon1"), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn concurrency_is_clamped() {
        let mut config = Config::new("key", "kr").unwrap();
        config.set_concurrency(0);
        assert_eq!(config.concurrency, 1);
        config.set_concurrency(32);
        assert_eq!(config.concurrency, MAX_CONCURRENCY);
    }

    #[test]
    fn provider_names_parse() {
        assert_eq!("Claude".parse::<LlmProvider>().unwrap(), LlmProvider::Anthropic);
        assert_eq!("openai".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);
        assert!("mistral".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn budget_rejects_zero() {
        assert!(parse_budget("X", "0").is_err());
        assert_eq!(parse_budget("X", " 7 ").unwrap().get(), 7);
    }
}
