//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Book DTOs
// ============================================================================

/// 生成书籍请求
#[derive(Debug, Deserialize)]
pub struct GenerateBookRequest {
    pub user_input: String,
    /// 缺省时使用配置的默认页数
    #[serde(default)]
    pub num_pages: Option<u32>,
}

/// 生成书籍响应
#[derive(Debug, Serialize)]
pub struct GenerateBookData {
    pub title: String,
    pub prompt: String,
    /// PDF 访问路径
    pub pdf_file: String,
    pub preview: String,
}
