//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::path::PathBuf;
use std::sync::Arc;

use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::request_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 生成的 PDF 目录
    pub books_dir: PathBuf,
    /// PDF 目录对外的 URL 前缀
    pub books_url_prefix: String,
    /// 网页前端目录（URL 前缀, 目录）
    pub static_files: Option<(String, PathBuf)>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5060,
            books_dir: PathBuf::from("generated_books"),
            books_url_prefix: "/generated_books".to_string(),
            static_files: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_books(mut self, dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        self.books_dir = dir.into();
        self.books_url_prefix = url_prefix.into();
        self
    }

    pub fn with_static_files(mut self, url_path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.static_files = Some((url_path.into(), dir.into()));
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 构建 Router
pub fn build_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
    // CORS 配置 - 允许所有来源的跨域请求
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .expose_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let mut router = create_routes().nest_service(
        &config.books_url_prefix,
        ServeDir::new(&config.books_dir),
    );

    if let Some((path, dir)) = &config.static_files {
        // 根路径不能 nest，只能作为 fallback
        router = if path == "/" {
            router.fallback_service(ServeDir::new(dir))
        } else {
            router.nest_service(path, ServeDir::new(dir))
        };
    }

    router
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(&self.config, self.state.clone());
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::path::Path;
    use tower::util::ServiceExt;

    use crate::application::generation::testing::{
        sample_dataset, FakeImageModel, MemoryImageStorage, RecordingPacer, ScriptedTextModel,
    };
    use crate::application::ports::{BookRendererPort, RenderError};
    use crate::application::{
        ChapterPipeline, EntitySelector, GenerateBookHandler, GenerateBookSettings, Illustrator,
        PipelineConfig,
    };
    use crate::domain::Book;

    /// 把文件名写入目录的渲染器
    struct TouchRenderer {
        dir: PathBuf,
    }

    impl BookRendererPort for TouchRenderer {
        fn render(&self, book: &Book, file_name: &str) -> Result<PathBuf, RenderError> {
            let path = self.dir.join(file_name);
            std::fs::write(&path, book.title()).map_err(|e| RenderError::IoError(e.to_string()))?;
            Ok(path)
        }
    }

    fn router(books_dir: &Path) -> Router {
        let text = Arc::new(ScriptedTextModel::new());
        let selector = EntitySelector::new("Star Wars", text.clone(), Arc::new(sample_dataset()));
        let illustrator = Illustrator::new(
            "Star Wars",
            text.clone(),
            Arc::new(FakeImageModel::succeeding()),
            Arc::new(MemoryImageStorage::new()),
        );
        let pipeline = ChapterPipeline::new(
            PipelineConfig::default(),
            text,
            illustrator,
            Arc::new(RecordingPacer::new()),
        );
        let handler = GenerateBookHandler::new(
            selector,
            pipeline,
            Arc::new(TouchRenderer {
                dir: books_dir.to_path_buf(),
            }),
            GenerateBookSettings::default(),
        );
        // 默认页数取最小值，测试保持一章
        let state = Arc::new(AppState::new(handler, 27, "/generated_books"));
        let config = ServerConfig::default().with_books(books_dir, "/generated_books");
        build_router(&config, state)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let dir = tempfile::tempdir().unwrap();
        let response = router(dir.path())
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "holonovel");
    }

    #[tokio::test]
    async fn test_generate_book() {
        let dir = tempfile::tempdir().unwrap();
        let response = router(dir.path())
            .oneshot(post_json("/api/book/generate", r#"{"user_input": "Leia on Hoth"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["title"], "The Long Night");
        assert_eq!(body["data"]["prompt"], "Leia on Hoth");
        assert_eq!(body["data"]["pdf_file"], "/generated_books/The_Long_Night.pdf");
        assert!(body["data"]["preview"].as_str().unwrap().ends_with("..."));
        assert!(dir.path().join("The_Long_Night.pdf").exists());
    }

    #[tokio::test]
    async fn test_empty_prompt_returns_errno_400() {
        let dir = tempfile::tempdir().unwrap();
        let response = router(dir.path())
            .oneshot(post_json("/api/book/generate", r#"{"user_input": "   ", "num_pages": 50}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 400);
        assert_eq!(body["error"], "Prompt cannot be empty.");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_legacy_path_and_book_download() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(dir.path());

        let response = app
            .clone()
            .oneshot(post_json("/generate-book/", r#"{"user_input": "p", "num_pages": 27}"#))
            .await
            .unwrap();
        let body = json_body(response).await;
        let url = body["data"]["pdf_file"].as_str().unwrap().to_string();

        let response = app
            .oneshot(Request::builder().uri(&url).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"The Long Night");
    }
}
