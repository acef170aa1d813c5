//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping             GET   健康检查
//! - /api/book/generate    POST  生成书籍（同步返回 PDF 路径）
//! - /generate-book/       POST  同上，兼容旧路径

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有 API 路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/generate-book/", post(handlers::generate_book))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/book", book_routes())
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(handlers::generate_book))
}
