//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod dataset;
pub mod llm;
pub mod pdf;
pub mod storage;

pub use dataset::*;
pub use llm::*;
pub use pdf::*;
pub use storage::*;
