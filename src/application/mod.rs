//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextModel、ImageModel、ImageStorage、BookRenderer、Pacer）
//! - generation: 实体选择、章节流水线、插图
//! - commands: 命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod generation;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{GenerateBookHandler, GenerateBookSettings},
    GenerateBook, GenerateBookResponse,
};

pub use error::ApplicationError;

pub use generation::{ChapterPipeline, EntitySelector, GenerationError, Illustrator, PipelineConfig};

pub use ports::{
    BookRendererPort, CompletionRequest, GeneratedImage, ImageModelPort, ImageRequest,
    ImageStorageError, ImageStoragePort, ModelError, PacePoint, PacerPort, RenderError,
    TextModelPort,
};
