//! Request Throttle - 在外部调用边界做请求限速
//!
//! 以装饰器包装 TextModelPort / ImageModelPort，流水线本身不感知限速

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::application::ports::{
    CompletionRequest, GeneratedImage, ImageModelPort, ImageRequest, ModelError, TextModelPort,
};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// 每分钟请求数限制，0 表示不限速
///
/// 请求均匀分布（突发上限为 1），多个装饰器可共享同一个实例
#[derive(Clone, Default)]
pub struct RequestThrottle {
    limiter: Option<Arc<DirectRateLimiter>>,
}

impl RequestThrottle {
    pub fn per_minute(requests_per_minute: u32) -> Self {
        let limiter = NonZeroU32::new(requests_per_minute).map(|n| {
            let quota = Quota::per_minute(n).allow_burst(NonZeroU32::MIN);
            Arc::new(RateLimiter::direct(quota))
        });
        Self { limiter }
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

/// 限速文本模型
pub struct ThrottledTextModel {
    inner: Arc<dyn TextModelPort>,
    throttle: RequestThrottle,
}

impl ThrottledTextModel {
    pub fn new(inner: Arc<dyn TextModelPort>, throttle: RequestThrottle) -> Self {
        Self { inner, throttle }
    }
}

#[async_trait]
impl TextModelPort for ThrottledTextModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        self.throttle.acquire().await;
        self.inner.complete(request).await
    }
}

/// 限速图片模型
pub struct ThrottledImageModel {
    inner: Arc<dyn ImageModelPort>,
    throttle: RequestThrottle,
}

impl ThrottledImageModel {
    pub fn new(inner: Arc<dyn ImageModelPort>, throttle: RequestThrottle) -> Self {
        Self { inner, throttle }
    }
}

#[async_trait]
impl ImageModelPort for ThrottledImageModel {
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage, ModelError> {
        self.throttle.acquire().await;
        self.inner.generate(request).await
    }
}
