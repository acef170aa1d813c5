//! Application State

use crate::application::GenerateBookHandler;

/// 应用状态
pub struct AppState {
    pub generate_book_handler: GenerateBookHandler,
    /// 请求未指定页数时的默认值
    pub default_pages: u32,
    /// PDF 对外访问的 URL 前缀
    pub books_url_prefix: String,
}

impl AppState {
    pub fn new(
        generate_book_handler: GenerateBookHandler,
        default_pages: u32,
        books_url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            generate_book_handler,
            default_pages,
            books_url_prefix: books_url_prefix.into(),
        }
    }

    /// PDF 文件的访问路径
    pub fn book_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.books_url_prefix.trim_end_matches('/'), file_name)
    }
}
