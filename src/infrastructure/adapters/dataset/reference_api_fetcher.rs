//! Reference API Fetcher - 离线收集参考数据集
//!
//! 按 `next` 链接逐页抓取每个类别，页间固定延迟；
//! 某页失败时停止该类别，保留已取得的结果，不重试

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::json_dataset_loader::DatasetError;

/// 抓取配置
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// API 基础 URL
    pub base_url: String,
    pub categories: Vec<String>,
    /// 页间延迟（毫秒）
    pub page_delay_ms: u64,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 是否跳过证书校验
    pub accept_invalid_certs: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://swapi.dev/api".to_string(),
            categories: ["people", "planets", "starships", "vehicles", "species", "films"]
                .into_iter()
                .map(String::from)
                .collect(),
            page_delay_ms: 100,
            timeout_secs: 20,
            accept_invalid_certs: false,
        }
    }
}

/// 分页响应
#[derive(Debug, Deserialize)]
struct PageResponse {
    #[serde(default)]
    results: Vec<Value>,
    next: Option<String>,
}

/// 单个类别的抓取结果
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub category: String,
    pub records: usize,
    /// 写入的文件（无记录时为空）
    pub file: Option<PathBuf>,
}

/// 参考 API 抓取器
pub struct ReferenceApiFetcher {
    client: Client,
    config: FetcherConfig,
}

impl ReferenceApiFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, DatasetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| DatasetError::FetchError(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn category_url(&self, category: &str) -> String {
        format!("{}/{}/", self.config.base_url.trim_end_matches('/'), category)
    }

    async fn fetch_page(&self, url: &str) -> Result<PageResponse, DatasetError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DatasetError::FetchError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::FetchError(format!("HTTP {} for {}", status, url)));
        }

        response
            .json()
            .await
            .map_err(|e| DatasetError::FetchError(format!("Invalid page {}: {}", url, e)))
    }

    /// 抓取一个类别的全部记录
    pub async fn fetch_category(&self, category: &str) -> Vec<Value> {
        let mut results = Vec::new();
        let mut next_url = Some(self.category_url(category));

        tracing::info!(category = %category, "Starting category fetch");
        while let Some(url) = next_url.take() {
            tracing::debug!(url = %url, "Fetching page");
            match self.fetch_page(&url).await {
                Ok(page) => {
                    results.extend(page.results);
                    next_url = page.next;
                    tokio::time::sleep(Duration::from_millis(self.config.page_delay_ms)).await;
                }
                Err(e) => {
                    tracing::warn!(category = %category, error = %e, "Page fetch failed, stopping category");
                }
            }
        }

        tracing::info!(category = %category, records = results.len(), "Category fetch finished");
        results
    }

    /// 抓取所有类别并写入 `<dir>/<category>.json`
    pub async fn fetch_all(&self, dir: impl AsRef<Path>) -> Result<Vec<CategoryReport>, DatasetError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| DatasetError::IoError(e.to_string()))?;

        let mut reports = Vec::with_capacity(self.config.categories.len());
        for category in &self.config.categories {
            let records = self.fetch_category(category).await;
            let file = if records.is_empty() {
                None
            } else {
                let path = dir.join(format!("{}.json", category));
                let body = serde_json::to_string_pretty(&records)
                    .map_err(|e| DatasetError::IoError(e.to_string()))?;
                tokio::fs::write(&path, body)
                    .await
                    .map_err(|e| DatasetError::IoError(e.to_string()))?;
                tracing::info!(path = %path.display(), "Category saved");
                Some(path)
            };
            reports.push(CategoryReport {
                category: category.clone(),
                records: records.len(),
                file,
            });
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path as AxumPath, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// 本地分页 API：people 两页，planets 第二页返回 500
    async fn spawn_api() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let next_base = base.clone();

        let app = Router::new().route(
            "/api/:category/",
            get(
                move |AxumPath(category): AxumPath<String>,
                      Query(query): Query<HashMap<String, String>>| {
                    let base = next_base.clone();
                    async move {
                        let page = query.get("page").map(String::as_str).unwrap_or("1").to_string();
                        match (category.as_str(), page.as_str()) {
                            ("people", "1") => Ok(Json(json!({
                                "results": [{"name": "Luke Skywalker"}],
                                "next": format!("{}/api/people/?page=2", base)
                            }))),
                            ("people", "2") => Ok(Json(json!({
                                "results": [{"name": "Leia Organa"}],
                                "next": null
                            }))),
                            ("planets", "1") => Ok(Json(json!({
                                "results": [{"name": "Tatooine"}],
                                "next": format!("{}/api/planets/?page=2", base)
                            }))),
                            ("vehicles", "1") => Ok(Json(json!({"results": [], "next": null}))),
                            _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
                        }
                    }
                },
            ),
        );

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        base
    }

    fn fetcher(base: &str, categories: &[&str]) -> ReferenceApiFetcher {
        ReferenceApiFetcher::new(FetcherConfig {
            base_url: format!("{}/api", base),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            page_delay_ms: 0,
            timeout_secs: 5,
            accept_invalid_certs: false,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_follows_next_links() {
        let base = spawn_api().await;
        let records = fetcher(&base, &["people"]).fetch_category("people").await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "Luke Skywalker");
        assert_eq!(records[1]["name"], "Leia Organa");
    }

    #[tokio::test]
    async fn test_error_keeps_partial_results() {
        let base = spawn_api().await;
        let records = fetcher(&base, &["planets"]).fetch_category("planets").await;
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_writes_files() {
        let base = spawn_api().await;
        let temp_dir = tempdir().unwrap();
        let fetcher = fetcher(&base, &["people", "vehicles", "species"]);

        let reports = fetcher.fetch_all(temp_dir.path()).await.unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].records, 2);
        assert_eq!(reports[0].file.as_deref(), Some(temp_dir.path().join("people.json").as_path()));
        // 空类别与失败类别都不写文件
        assert!(reports[1].file.is_none());
        assert!(reports[2].file.is_none());
        assert!(!temp_dir.path().join("vehicles.json").exists());

        let saved: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("people.json")).unwrap())
                .unwrap();
        assert_eq!(saved.len(), 2);
    }
}
