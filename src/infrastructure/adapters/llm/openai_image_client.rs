//! OpenAI Image Client - images/generations
//!
//! POST {base_url}/images/generations
//! Request: {"model": "...", "prompt": "...", "size": "...", "quality": "...", "n": 1}
//! Response: {"data": [{"url": "..."}]}，随后下载图片内容

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::openai_config::{check_status, map_send_error, OpenAiConfig};
use crate::application::ports::{GeneratedImage, ImageModelPort, ImageRequest, ModelError};

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// OpenAI 图片生成客户端
pub struct OpenAiImageClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiImageClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ModelError> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ModelError> {
        let response = self.client.get(url).send().await.map_err(map_send_error)?;
        let response = check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to read image: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageModelPort for OpenAiImageClient {
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage, ModelError> {
        let url = self.config.endpoint("images/generations");
        let body = ImageGenerationRequest {
            model: &self.config.image_model,
            prompt: &request.prompt,
            size: &self.config.image_size,
            quality: &self.config.image_quality,
            n: 1,
        };

        tracing::debug!(
            url = %url,
            model = %self.config.image_model,
            size = %self.config.image_size,
            "Sending image generation request"
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

        let parsed: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse image response: {}", e)))?;

        let image_url = parsed
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| ModelError::InvalidResponse("Image response has no URL".to_string()))?;

        let data = self.download(&image_url).await?;
        tracing::info!(size = data.len(), "Image generated");

        Ok(GeneratedImage {
            data,
            source_url: Some(image_url),
        })
    }
}
