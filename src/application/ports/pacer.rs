//! Pacer Port - 调用节奏控制
//!
//! 流水线只声明"在哪里需要停顿"，停多久由实现决定

use async_trait::async_trait;

/// 停顿点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacePoint {
    /// 同一单元的两节之间
    BetweenSections,
    /// 两章之间
    BetweenChapters,
}

/// Pacer Port
#[async_trait]
pub trait PacerPort: Send + Sync {
    async fn pause(&self, point: PacePoint);
}
