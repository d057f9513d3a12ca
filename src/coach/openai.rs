use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{checked_body, non_empty, TextGenerator, SYSTEM_PROMPT};
use crate::api::transport::Transport;
use crate::error::AppError;

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o";
const MAX_TOKENS: u32 = 3000;
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

pub struct OpenAiCoach {
    api_key: String,
    transport: Box<dyn Transport>,
}

impl OpenAiCoach {
    pub fn new(api_key: String, transport: Box<dyn Transport>) -> Self {
        OpenAiCoach { api_key, transport }
    }
}

impl TextGenerator for OpenAiCoach {
    fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let payload = json!({
            "model": MODEL,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE
        });
        let auth = format!("Bearer {}", self.api_key);
        debug!(model = MODEL, prompt_chars = prompt.len(), "openai completion");

        let body = checked_body(
            "OpenAI",
            self.transport
                .post_json(ENDPOINT, &[("Authorization", auth.as_str())], &payload),
        )?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))?;
        non_empty(
            "OpenAI",
            parsed.choices.into_iter().next().and_then(|c| c.message.content),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::RawResponse;
    use crate::coach::testing::CannedTransport;
    use std::sync::{Arc, Mutex};

    fn coach(reply: Result<RawResponse, String>) -> (OpenAiCoach, Arc<Mutex<Vec<(String, Vec<(String, String)>, serde_json::Value)>>>) {
        let posted = Arc::new(Mutex::new(Vec::new()));
        let transport = CannedTransport {
            reply,
            posted: Arc::clone(&posted),
        };
        (OpenAiCoach::new("sk-test".to_string(), Box::new(transport)), posted)
    }

    #[test]
    fn sends_system_and_user_messages_with_bearer_key() {
        let (coach, posted) = coach(Ok(RawResponse::ok(
            r#"{"choices":[{"message":{"content":"Ban Zed."}}]}"#,
        )));

        assert_eq!(coach.complete("brief me").unwrap(), "Ban Zed.");

        let posted = posted.lock().unwrap();
        let (url, headers, body) = &posted[0];
        assert_eq!(url, ENDPOINT);
        assert!(headers.contains(&("Authorization".to_string(), "Bearer sk-test".to_string())));
        assert_eq!(body["messages"][1]["content"], "brief me");
        assert_eq!(body["model"], MODEL);
    }

    #[test]
    fn empty_content_is_an_error() {
        let (coach, _) = coach(Ok(RawResponse::ok(r#"{"choices":[{"message":{"content":""}}]}"#)));
        assert!(matches!(coach.complete("x"), Err(AppError::CoachError(_))));

        let (coach, _) = self::coach(Ok(RawResponse::ok(r#"{"choices":[]}"#)));
        assert!(matches!(coach.complete("x"), Err(AppError::CoachError(_))));
    }

    #[test]
    fn http_errors_are_coach_errors() {
        let (coach, _) = coach(Ok(RawResponse::status(401)));
        assert!(matches!(coach.complete("x"), Err(AppError::CoachError(_))));
    }
}
