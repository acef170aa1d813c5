//! 生成流程 - 实体选择、章节流水线、插图
//!
//! 外部调用全部通过 ports 完成，流程本身不关心具体服务

mod chapter_pipeline;
mod entity_selector;
mod error;
mod illustrator;

#[cfg(test)]
pub(crate) mod testing;

pub use chapter_pipeline::{ChapterPipeline, PipelineConfig};
pub use entity_selector::EntitySelector;
pub use error::GenerationError;
pub use illustrator::Illustrator;
