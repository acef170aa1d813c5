//! Image Storage Port - 插图存储抽象

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 插图存储错误
#[derive(Debug, Error)]
pub enum ImageStorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Empty image data")]
    EmptyData,
}

/// Image Storage Port
#[async_trait]
pub trait ImageStoragePort: Send + Sync {
    /// 以随机文件名保存图片，返回保存路径
    async fn save_image(&self, data: &[u8]) -> Result<PathBuf, ImageStorageError>;
}
