//! Text Model Port - 文本大模型抽象
//!
//! 定义文本补全的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 模型调用错误（文本与图片模型共用）
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 文本补全请求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// 用户消息内容
    pub prompt: String,
    /// 采样温度
    pub temperature: f32,
    /// 最大输出 token 数
    pub max_tokens: Option<u32>,
    /// 是否要求 JSON 对象输出
    pub json_mode: bool,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            max_tokens: None,
            json_mode: false,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Text Model Port
///
/// 外部文本模型服务的抽象接口，返回首个候选的文本内容
#[async_trait]
pub trait TextModelPort: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError>;
}
