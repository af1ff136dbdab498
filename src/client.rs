use crate::config::{self, Config};
use crate::error::{GitAiError, Result};
use crate::prompt::SYSTEM_PROMPT;
use crate::suggest::TextGenerator;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const TEMPERATURE: f32 = 0.2;
const MAX_COMPLETION_TOKENS: u32 = 500;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatClient {
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_url(),
            config::effective_api_key(config),
            config::effective_model(config),
        )
    }

    fn request_body(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: Some(TEMPERATURE),
            max_completion_tokens: Some(MAX_COMPLETION_TOKENS),
            stream: false,
        };
        Ok(serde_json::to_string(&request)?)
    }
}

impl TextGenerator for ChatClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(GitAiError::MissingApiKey)?;
        let body = self.request_body(prompt)?;

        debug!(url = %self.api_url, model = %self.model, "sending completion request");
        let response = http_agent()
            .post(&self.api_url)
            .header("Authorization", &format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .send(&body)
            .map_err(|e| GitAiError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .into_body()
            .read_to_string()
            .map_err(|e| GitAiError::NetworkError(e.to_string()))?;
        debug!(status, bytes = text.len(), "completion response received");

        parse_completion(status, &text)
    }
}

// Status codes are checked in parse_completion so error bodies reach the user.
fn http_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn parse_completion(status: u16, body: &str) -> Result<String> {
    match status {
        200..=299 => {}
        401 => return Err(GitAiError::InvalidApiKey("Authentication failed".to_string())),
        429 => {
            return Err(GitAiError::ApiError {
                status,
                message: "Rate limited. Please wait and try again.".to_string(),
            });
        }
        _ => {
            return Err(GitAiError::ApiError {
                status,
                message: body.trim().to_string(),
            });
        }
    }

    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GitAiError::ApiError {
            status,
            message: "Response contained no message content".to_string(),
        })
}
