//! Dataset Context - 参考数据限界上下文
//!
//! 职责:
//! - 参考数据集（只读）
//! - 实体选择过滤
//! - 实体上下文

mod records;

pub use records::{
    EntityContext, EntityRecord, EntitySelection, ReferenceDataset, DEFAULT_CONTEXT_CATEGORIES,
};
