//! OpenAI 兼容服务的公共配置与错误映射

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::application::ports::ModelError;

/// OpenAI 兼容客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API 基础 URL（包含 /v1）
    pub base_url: String,
    pub api_key: String,
    /// 文本模型名称
    pub text_model: String,
    /// 图片模型名称
    pub image_model: String,
    /// 图片尺寸
    pub image_size: String,
    /// 图片质量
    pub image_quality: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            text_model: "gpt-4-1106-preview".to_string(),
            image_model: "dall-e-3".to_string(),
            image_size: "1024x1792".to_string(),
            image_quality: "standard".to_string(),
            timeout_secs: 120,
        }
    }
}

impl OpenAiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub(super) fn build_client(&self) -> Result<Client, ModelError> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| ModelError::NetworkError(e.to_string()))
    }
}

/// reqwest 发送错误 -> ModelError
pub(super) fn map_send_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::Timeout
    } else if e.is_connect() {
        ModelError::NetworkError(format!("Cannot connect to model service: {}", e))
    } else {
        ModelError::NetworkError(e.to_string())
    }
}

/// 非 2xx 响应 -> ModelError
pub(super) async fn check_status(response: Response) -> Result<Response, ModelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ModelError::AuthenticationFailed(format!("HTTP {}: {}", status, error_text))
        }
        StatusCode::TOO_MANY_REQUESTS => ModelError::RateLimited,
        _ => ModelError::ServiceError(format!("HTTP {}: {}", status, error_text)),
    })
}
