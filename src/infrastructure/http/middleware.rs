//! HTTP Middleware
//!
//! 请求耗时与错误状态日志

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 请求日志中间件
///
/// 生成请求可能持续数分钟，所有 POST 请求都记录耗时；
/// 4xx/5xx 状态码分别记为 warn/error
/// 业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, %uri, status, elapsed_ms, "HTTP server error");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %uri, status, elapsed_ms, "HTTP client error");
    } else if method == axum::http::Method::POST {
        tracing::info!(%method, %uri, status, elapsed_ms, "Request completed");
    }

    response
}
