use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{checked_body, non_empty, TextGenerator, SYSTEM_PROMPT};
use crate::api::transport::Transport;
use crate::error::AppError;

const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct AnthropicCoach {
    api_key: String,
    transport: Box<dyn Transport>,
}

impl AnthropicCoach {
    pub fn new(api_key: String, transport: Box<dyn Transport>) -> Self {
        AnthropicCoach { api_key, transport }
    }
}

impl TextGenerator for AnthropicCoach {
    fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let payload = json!({
            "model": MODEL,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "system": SYSTEM_PROMPT,
            "messages": [{"role": "user", "content": prompt}]
        });
        debug!(model = MODEL, prompt_chars = prompt.len(), "anthropic completion");

        let body = checked_body(
            "Anthropic",
            self.transport.post_json(
                ENDPOINT,
                &[("x-api-key", self.api_key.as_str()), ("anthropic-version", API_VERSION)],
                &payload,
            ),
        )?;
        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))?;
        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");
        non_empty("Anthropic", Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::RawResponse;
    use crate::coach::testing::CannedTransport;
    use std::sync::{Arc, Mutex};

    #[test]
    fn joins_text_blocks_and_sends_version_header() {
        let posted = Arc::new(Mutex::new(Vec::new()));
        let transport = CannedTransport {
            reply: Ok(RawResponse::ok(
                r#"{"content":[{"type":"text","text":"Play safe early."},{"type":"text","text":"Track the jungler."}]}"#,
            )),
            posted: Arc::clone(&posted),
        };
        let coach = AnthropicCoach::new("sk-ant".to_string(), Box::new(transport));

        assert_eq!(coach.complete("brief").unwrap(), "Play safe early.\nTrack the jungler.");

        let posted = posted.lock().unwrap();
        let (_, headers, body) = &posted[0];
        assert!(headers.contains(&("anthropic-version".to_string(), API_VERSION.to_string())));
        assert!(headers.contains(&("x-api-key".to_string(), "sk-ant".to_string())));
        assert_eq!(body["messages"][0]["content"], "brief");
    }

    #[test]
    fn no_text_is_an_error() {
        let transport = CannedTransport {
            reply: Ok(RawResponse::ok(r#"{"content":[]}"#)),
            posted: Arc::new(Mutex::new(Vec::new())),
        };
        let coach = AnthropicCoach::new("k".to_string(), Box::new(transport));
        assert!(matches!(coach.complete("x"), Err(AppError::CoachError(_))));
    }
}
