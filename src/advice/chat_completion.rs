//! Chat-completion client for OpenAI-compatible endpoints

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::AdviceError;

/// A single role/content message in a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

/// Client for a chat-completion API: one POST per request, bearer auth,
/// returns the single completion text.
pub struct ChatCompletionClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Request a completion for the given messages
    pub fn complete(&self, messages: &[ChatMessage]) -> Result<String, AdviceError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!("chat completion request to {} (model {})", url, self.model);

        let request = CompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| AdviceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdviceError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| AdviceError::Transport(e.to_string()))?;

        Self::parse_completion(&body)
    }

    /// Extract the completion text from a response body
    fn parse_completion(body: &str) -> Result<String, AdviceError> {
        let response: CompletionResponse = serde_json::from_str(body)
            .map_err(|e| AdviceError::MalformedResponse(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AdviceError::MalformedResponse("no choices in response".into()))
    }
}
