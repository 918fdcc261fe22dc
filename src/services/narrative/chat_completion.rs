//! Chat-completions narrative generator
//!
//! Talks to any OpenAI-compatible endpoint:
//! `POST {api_url}/chat/completions` with a bearer key and a single user message.
//! The first choice's message content becomes the narrative.

use crate::{
    error::{AppError, AppResult},
    services::narrative::{NarrativeGenerator, NarrativeRequest},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

const MAX_TOKENS: u32 = 200;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Clone)]
pub struct ChatCompletionNarrator {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl ChatCompletionNarrator {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }

    fn build_request<'a>(&'a self, request: &NarrativeRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(request.to_prompt()),
            }],
        }
    }

    fn extract_content(response: ChatResponse) -> AppResult<String> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                AppError::ExternalApi("Narrative service returned no content".to_string())
            })
    }
}

#[async_trait::async_trait]
impl NarrativeGenerator for ChatCompletionNarrator {
    async fn generate(&self, request: &NarrativeRequest) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.build_request(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Narrative service returned status {}: {}",
                status, body
            )));
        }

        let body: ChatResponse = response.json().await?;
        let content = Self::extract_content(body)?;

        tracing::info!(
            provider = self.name(),
            model = %self.model,
            chars = content.chars().count(),
            "Narrative generated"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "chat_completion"
    }
}
