//! 插图生成器
//!
//! 两步流程：
//! 1. 文本模型把章节摘要改写为安全的、只描述角色身份的画面段落
//! 2. 图片模型按该段落生成图片，保存到本地
//!
//! 插图只是装饰，任一步失败都返回 None

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{
    CompletionRequest, ImageModelPort, ImageRequest, ImageStorageError, ImageStoragePort,
    ModelError, TextModelPort,
};
use crate::domain::prompts;

/// 插图失败原因（只用于日志）
#[derive(Debug, Error)]
enum IllustrationError {
    #[error("prompt sanitizing failed: {0}")]
    Prompt(ModelError),

    #[error("sanitized prompt is empty")]
    EmptyPrompt,

    #[error("image generation failed: {0}")]
    Image(ModelError),

    #[error("saving image failed: {0}")]
    Storage(ImageStorageError),
}

/// 插图生成器
pub struct Illustrator {
    theme: String,
    text_model: Arc<dyn TextModelPort>,
    image_model: Arc<dyn ImageModelPort>,
    image_storage: Arc<dyn ImageStoragePort>,
}

impl Illustrator {
    pub fn new(
        theme: impl Into<String>,
        text_model: Arc<dyn TextModelPort>,
        image_model: Arc<dyn ImageModelPort>,
        image_storage: Arc<dyn ImageStoragePort>,
    ) -> Self {
        Self {
            theme: theme.into(),
            text_model,
            image_model,
            image_storage,
        }
    }

    /// 根据章节摘要生成插图，返回本地路径
    pub async fn illustrate(&self, summary: &str) -> Option<PathBuf> {
        let preview: String = summary.chars().take(80).collect();
        tracing::info!(summary = %preview, "Generating chapter illustration");

        match self.try_illustrate(summary).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Chapter illustration saved");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not generate chapter illustration");
                None
            }
        }
    }

    async fn try_illustrate(&self, summary: &str) -> Result<PathBuf, IllustrationError> {
        let request = CompletionRequest::new(prompts::safe_image_prompt(&self.theme, summary), 0.7)
            .with_max_tokens(250);

        let sanitized = self
            .text_model
            .complete(request)
            .await
            .map_err(IllustrationError::Prompt)?;
        let image_prompt = sanitized.trim().trim_matches('"').trim().to_string();
        if image_prompt.is_empty() {
            return Err(IllustrationError::EmptyPrompt);
        }

        tracing::debug!(prompt = %image_prompt, "Sanitized image prompt");

        let image = self
            .image_model
            .generate(ImageRequest {
                prompt: image_prompt,
            })
            .await
            .map_err(IllustrationError::Image)?;

        if let Some(url) = &image.source_url {
            tracing::debug!(url = %url, size = image.data.len(), "Image downloaded");
        }

        self.image_storage
            .save_image(&image.data)
            .await
            .map_err(IllustrationError::Storage)
    }
}
