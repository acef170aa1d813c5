//! Image Model Port - 图片生成模型抽象

use async_trait::async_trait;

use super::ModelError;

/// 图片生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// 画面描述
    pub prompt: String,
}

/// 生成的图片
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// 原始图片数据（PNG）
    pub data: Vec<u8>,
    /// 服务端返回的来源地址（用于日志）
    pub source_url: Option<String>,
}

/// Image Model Port
///
/// 负责生成并取回图片数据，落盘由 ImageStoragePort 负责
#[async_trait]
pub trait ImageModelPort: Send + Sync {
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage, ModelError>;
}
