//! Fixed Delay Pacer - 在节/章之间固定等待

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{PacePoint, PacerPort};

/// 固定延迟 Pacer
#[derive(Debug, Clone)]
pub struct FixedDelayPacer {
    between_sections: Duration,
    between_chapters: Duration,
}

impl FixedDelayPacer {
    pub fn new(between_sections: Duration, between_chapters: Duration) -> Self {
        Self {
            between_sections,
            between_chapters,
        }
    }

    pub fn from_millis(section_ms: u64, chapter_ms: u64) -> Self {
        Self::new(Duration::from_millis(section_ms), Duration::from_millis(chapter_ms))
    }

    pub fn delay_for(&self, point: PacePoint) -> Duration {
        match point {
            PacePoint::BetweenSections => self.between_sections,
            PacePoint::BetweenChapters => self.between_chapters,
        }
    }
}

#[async_trait]
impl PacerPort for FixedDelayPacer {
    async fn pause(&self, point: PacePoint) {
        let delay = self.delay_for(point);
        if delay.is_zero() {
            return;
        }
        tracing::debug!(?point, delay_ms = delay.as_millis() as u64, "Cooling down");
        tokio::time::sleep(delay).await;
    }
}
