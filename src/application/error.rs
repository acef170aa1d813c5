//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::generation::GenerationError;
use crate::application::ports::RenderError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 生成流程失败（正文、书名、章节标题）
    #[error(transparent)]
    GenerationFailed(#[from] GenerationError),

    /// 文档渲染失败
    #[error("Render error: {0}")]
    RenderFailed(#[from] RenderError),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}
