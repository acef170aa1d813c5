//! 生成错误
//!
//! 只有结构性内容（正文、书名、章节标题）的调用失败才会产生该错误，
//! 摘要、插图、实体选择解析失败都在本地降级处理

use thiserror::Error;

use crate::application::ports::ModelError;

/// 流水线致命错误，整个生成请求随之失败
#[derive(Debug, Error)]
#[error("Generation failed for '{unit}': {source}")]
pub struct GenerationError {
    /// 失败所在的叙事单元或步骤
    pub unit: String,
    #[source]
    pub source: ModelError,
}

impl GenerationError {
    pub fn new(unit: impl Into<String>, source: ModelError) -> Self {
        Self {
            unit: unit.into(),
            source,
        }
    }
}
