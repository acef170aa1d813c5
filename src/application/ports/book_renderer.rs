//! Book Renderer Port - 文档渲染抽象
//!
//! 输入是流水线产出的完整 Book，渲染只会因环境问题失败

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Book;

/// 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("PDF error: {0}")]
    PdfError(String),
}

/// Book Renderer Port
///
/// 同步接口，调用方负责放到阻塞线程池执行
pub trait BookRendererPort: Send + Sync {
    /// 渲染书籍，返回生成文件路径
    fn render(&self, book: &Book, file_name: &str) -> Result<PathBuf, RenderError>;
}
