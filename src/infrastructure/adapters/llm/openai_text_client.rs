//! OpenAI Text Client - chat completions
//!
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [{"role": "user", "content": "..."}], ...}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::openai_config::{check_status, map_send_error, OpenAiConfig};
use crate::application::ports::{CompletionRequest, ModelError, TextModelPort};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// OpenAI 文本补全客户端
pub struct OpenAiTextClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiTextClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ModelError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.text_model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }
}

#[async_trait]
impl TextModelPort for OpenAiTextClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let url = self.config.endpoint("chat/completions");
        let body = self.body(&request);

        tracing::debug!(
            url = %url,
            model = %self.config.text_model,
            prompt_len = request.prompt.len(),
            temperature = request.temperature,
            max_tokens = ?request.max_tokens,
            json_mode = request.json_mode,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;
        let response = check_status(response).await?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse completion: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ModelError::InvalidResponse("Completion has no content".to_string()))?;

        tracing::debug!(content_len = content.len(), "Chat completion received");
        Ok(content)
    }
}
