//! JSON Dataset Loader - 从目录加载参考数据集
//!
//! 目录下每个 `<category>.json` 是一个记录数组

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::domain::dataset::{EntityRecord, ReferenceDataset};

/// 数据集错误
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset directory not found: {0}. Run the fetch_dataset binary first.")]
    DirectoryNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid dataset file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Fetch error: {0}")]
    FetchError(String),
}

/// 加载数据集目录
///
/// 目录不存在视为启动失败；非 .json 文件被忽略
pub async fn load_dataset(dir: impl AsRef<Path>) -> Result<ReferenceDataset, DatasetError> {
    let dir = dir.as_ref();
    if !fs::try_exists(dir).await.unwrap_or(false) {
        return Err(DatasetError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut categories = BTreeMap::new();
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| DatasetError::IoError(e.to_string()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DatasetError::IoError(e.to_string()))?
    {
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        let Some(category) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let raw = fs::read_to_string(&path)
            .await
            .map_err(|e| DatasetError::IoError(e.to_string()))?;
        let records: Vec<EntityRecord> =
            serde_json::from_str(&raw).map_err(|e| DatasetError::ParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(category = %category, records = records.len(), "Dataset category loaded");
        categories.insert(category, records);
    }

    let dataset = ReferenceDataset::new(categories);
    tracing::info!(
        dir = %dir.display(),
        categories = dataset.category_names().count(),
        records = dataset.len(),
        "Reference dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_dataset() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("people.json"),
            r#"[{"name": "Luke Skywalker", "height": "172"}, {"name": "Leia Organa"}]"#,
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("films.json"),
            r#"[{"title": "A New Hope", "episode_id": 4}]"#,
        )
        .unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let dataset = load_dataset(temp_dir.path()).await.unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.category_names().collect::<Vec<_>>(), vec!["films", "people"]);
        let people = dataset.category("people").unwrap();
        assert_eq!(people[0].display_name(), Some("Luke Skywalker"));
        assert_eq!(
            dataset.category("films").unwrap()[0].display_name(),
            Some("A New Hope")
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_fatal() {
        let temp_dir = tempdir().unwrap();
        let result = load_dataset(temp_dir.path().join("swapi_data")).await;
        assert!(matches!(result, Err(DatasetError::DirectoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_file_is_reported() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("people.json"), "{not json").unwrap();

        let result = load_dataset(temp_dir.path()).await;
        assert!(matches!(result, Err(DatasetError::ParseError { .. })));
    }

    #[tokio::test]
    async fn test_empty_directory_loads_empty_dataset() {
        let temp_dir = tempdir().unwrap();
        let dataset = load_dataset(temp_dir.path()).await.unwrap();
        assert!(dataset.is_empty());
    }
}
