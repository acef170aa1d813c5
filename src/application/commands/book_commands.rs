//! Book Commands - 生成书籍命令

use std::path::PathBuf;

/// 生成书籍命令
#[derive(Debug, Clone)]
pub struct GenerateBook {
    /// 用户故事提示（处理前会去除首尾空白）
    pub user_input: String,
    /// 请求页数，超过上限时截断
    pub num_pages: u32,
}

/// 生成书籍响应
#[derive(Debug, Clone)]
pub struct GenerateBookResponse {
    pub title: String,
    pub prompt: String,
    /// PDF 文件名（不含目录）
    pub file_name: String,
    pub pdf_path: PathBuf,
    /// 楔子开头预览
    pub preview: String,
}
