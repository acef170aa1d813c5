//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Book Context: 篇幅规划、书籍与章节
//! - Dataset Context: 参考数据与实体上下文
//!
//! 以及共享的连续性摘要和提示词模板

pub mod book;
pub mod continuity;
pub mod dataset;
pub mod prompts;

pub use book::{plan, Book, BookPlan, Chapter, DebugContext};
pub use continuity::Summary;
pub use dataset::{EntityContext, EntityRecord, EntitySelection, ReferenceDataset};
