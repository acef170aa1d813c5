//! File Image Storage - 文件系统插图存储实现
//!
//! 实现 ImageStoragePort trait，文件名为 12 位随机字母数字

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ImageStorageError, ImageStoragePort};

const FILE_STEM_LEN: usize = 12;

/// 文件系统插图存储
pub struct FileImageStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileImageStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, ImageStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| ImageStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn random_file_name() -> String {
        let stem: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(FILE_STEM_LEN)
            .map(char::from)
            .collect();
        format!("{}.png", stem)
    }
}

#[async_trait]
impl ImageStoragePort for FileImageStorage {
    async fn save_image(&self, data: &[u8]) -> Result<PathBuf, ImageStorageError> {
        if data.is_empty() {
            return Err(ImageStorageError::EmptyData);
        }

        let path = self.base_dir.join(Self::random_file_name());

        fs::write(&path, data)
            .await
            .map_err(|e| ImageStorageError::IoError(e.to_string()))?;

        tracing::debug!(path = %path.display(), size = data.len(), "Saved image");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_image() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path().join("images")).await.unwrap();

        let path = storage.save_image(b"fake png data").await.unwrap();

        assert!(path.exists());
        assert_eq!(path.parent().unwrap(), storage.base_dir());
        assert_eq!(std::fs::read(&path).unwrap(), b"fake png data");

        let stem = path.file_stem().unwrap().to_str().unwrap();
        assert_eq!(stem.len(), 12);
        assert!(stem.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(path.extension().unwrap(), "png");
    }

    #[tokio::test]
    async fn test_distinct_names() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path()).await.unwrap();

        let a = storage.save_image(b"a").await.unwrap();
        let b = storage.save_image(b"b").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_empty_data_rejected() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path()).await.unwrap();

        let result = storage.save_image(&[]).await;
        assert!(matches!(result, Err(ImageStorageError::EmptyData)));
    }
}
