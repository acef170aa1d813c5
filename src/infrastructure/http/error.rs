//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const INTERNAL_ERROR: i32 = 500;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno::BAD_REQUEST, error = %msg, "Bad request");
                ErrorResponse::new(errno::BAD_REQUEST, msg.clone())
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, msg.clone())
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(format!("An internal error occurred: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ModelError;
    use crate::application::GenerationError;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: ApiError = ApplicationError::validation("Prompt cannot be empty.").into();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "Prompt cannot be empty."));
    }

    #[test]
    fn test_generation_failure_maps_to_internal() {
        let err: ApiError =
            ApplicationError::from(GenerationError::new("Chapter 1: One", ModelError::Timeout)).into();
        match err {
            ApiError::Internal(msg) => {
                assert!(msg.starts_with("An internal error occurred: "));
                assert!(msg.contains("Chapter 1: One"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
