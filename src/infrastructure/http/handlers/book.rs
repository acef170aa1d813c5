//! Book HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateBook;
use crate::infrastructure::http::dto::{ApiResponse, GenerateBookData, GenerateBookRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成书籍
///
/// POST /api/book/generate
/// 同步执行整个生成流程，完成后返回 PDF 访问路径
pub async fn generate_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateBookRequest>,
) -> Result<Json<ApiResponse<GenerateBookData>>, ApiError> {
    let command = GenerateBook {
        user_input: req.user_input,
        num_pages: req.num_pages.unwrap_or(state.default_pages),
    };

    let response = state.generate_book_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(GenerateBookData {
        pdf_file: state.book_url(&response.file_name),
        title: response.title,
        prompt: response.prompt,
        preview: response.preview,
    })))
}
