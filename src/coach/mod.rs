//! Text-generation backends that narrate a scouting report or a performance
//! summary. The core only hands them a prompt and checks that something came
//! back.

mod anthropic;
mod openai;
pub mod prompt;

pub use anthropic::AnthropicCoach;
pub use openai::OpenAiCoach;

use crate::api::transport::{RawResponse, Transport, UreqTransport};
use crate::config::{Config, LlmProvider};
use crate::error::AppError;

pub const SYSTEM_PROMPT: &str = "You are a professional League of Legends coach (Challenger/Master level). \
Give technical, direct analysis using proper LoL vocabulary (macro, micro, wave management). \
Be precise and actionable.";

pub trait TextGenerator {
    fn complete(&self, prompt: &str) -> Result<String, AppError>;
}

/// Picks the backend named by `config.llm_provider`.
pub fn from_config(config: &Config) -> Result<Box<dyn TextGenerator>, AppError> {
    let transport: Box<dyn Transport> = Box::new(UreqTransport::new());
    match config.llm_provider {
        LlmProvider::OpenAi => {
            let key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| AppError::ConfigError("OPENAI_API_KEY is not set".to_string()))?;
            Ok(Box::new(OpenAiCoach::new(key, transport)))
        }
        LlmProvider::Anthropic => {
            let key = config
                .anthropic_api_key
                .clone()
                .ok_or_else(|| AppError::ConfigError("ANTHROPIC_API_KEY is not set".to_string()))?;
            Ok(Box::new(AnthropicCoach::new(key, transport)))
        }
    }
}

fn checked_body(provider: &str, response: Result<RawResponse, String>) -> Result<String, AppError> {
    let response = response.map_err(|e| AppError::CoachError(format!("{} request failed: {}", provider, e)))?;
    if !response.is_success() {
        return Err(AppError::CoachError(format!(
            "{} returned HTTP {}: {}",
            provider,
            response.status,
            response.body.chars().take(200).collect::<String>()
        )));
    }
    Ok(response.body)
}

fn non_empty(provider: &str, text: Option<String>) -> Result<String, AppError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::CoachError(format!("{} returned an empty response", provider))),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Replies with one canned response and records the posted payload.
    pub struct CannedTransport {
        pub reply: Result<RawResponse, String>,
        pub posted: Arc<Mutex<Vec<(String, Vec<(String, String)>, serde_json::Value)>>>,
    }

    impl Transport for CannedTransport {
        fn get(&self, _: &str, _: &[(&str, &str)]) -> Result<RawResponse, String> {
            unreachable!("coach backends only post")
        }

        fn post_json(
            &self,
            url: &str,
            headers: &[(&str, &str)],
            body: &serde_json::Value,
        ) -> Result<RawResponse, String> {
            self.posted.lock().unwrap().push((
                url.to_string(),
                headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                body.clone(),
            ));
            self.reply.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_for_selected_provider_is_a_config_error() {
        let mut config = Config::new("riot", "euw1").unwrap();
        config.llm_provider = LlmProvider::Anthropic;
        config.openai_api_key = Some("sk-x".to_string());
        assert!(matches!(from_config(&config), Err(AppError::ConfigError(_))));

        config.anthropic_api_key = Some("sk-ant".to_string());
        assert!(from_config(&config).is_ok());
    }
}
