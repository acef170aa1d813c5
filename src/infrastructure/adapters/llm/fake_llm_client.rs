//! Fake LLM Clients - 离线文本/图片模型
//!
//! 不调用任何外部服务，按提示词类型返回固定内容，用于本地演示和联调

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{
    CompletionRequest, GeneratedImage, ImageModelPort, ImageRequest, ModelError, TextModelPort,
};

/// 1x1 RGB PNG
const PLACEHOLDER_PNG: [u8; 69] = [
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xd0,
    0xb0, 0x89, 0x02, 0x00, 0x01, 0x4e, 0x00, 0xbf, 0x8a, 0xf6, 0x3d, 0xe3, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

const FAKE_PARAGRAPH: &str = "The twin suns hung low over the dunes as the old freighter settled onto the cracked landing pad. \
Dust curled around the ramp while the crew stepped out, scanning the horizon for any sign of pursuit. \
Somewhere beyond the ridge a signal beacon pulsed, patient and insistent, promising answers to questions nobody aboard had dared to ask aloud.";

/// Fake 客户端配置
#[derive(Debug, Clone)]
pub struct FakeLlmConfig {
    /// 模拟调用延迟（毫秒）
    pub latency_ms: u64,
}

impl Default for FakeLlmConfig {
    fn default() -> Self {
        Self { latency_ms: 50 }
    }
}

/// Fake 文本模型
pub struct FakeTextClient {
    config: FakeLlmConfig,
}

impl FakeTextClient {
    pub fn new(config: FakeLlmConfig) -> Self {
        tracing::info!(latency_ms = config.latency_ms, "FakeTextClient initialized");
        Self { config }
    }

    fn respond(request: &CompletionRequest) -> String {
        let prompt = request.prompt.as_str();
        if request.json_mode {
            r#"{"people": [], "planets": [], "starships": []}"#.to_string()
        } else if prompt.starts_with("Generate a short") {
            "Echoes of the Outer Rim".to_string()
        } else if prompt.starts_with("I am writing a") {
            (1..=12)
                .map(|n| format!("{}. Echo {}", n, n))
                .collect::<Vec<_>>()
                .join("\n")
        } else if prompt.starts_with("Summarize the following") {
            "The crew lands on a desert world and follows a mysterious beacon.".to_string()
        } else if prompt.starts_with("Based on the following chapter summary") {
            "A cinematic digital painting of a battered freighter on a desert landing pad at dusk."
                .to_string()
        } else {
            [FAKE_PARAGRAPH; 3].join("\n\n")
        }
    }
}

#[async_trait]
impl TextModelPort for FakeTextClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        tracing::debug!(prompt_len = request.prompt.len(), "FakeTextClient: returning canned text");
        tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        Ok(Self::respond(&request))
    }
}

/// Fake 图片模型，返回 1x1 占位图
pub struct FakeImageClient {
    config: FakeLlmConfig,
}

impl FakeImageClient {
    pub fn new(config: FakeLlmConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ImageModelPort for FakeImageClient {
    async fn generate(&self, request: ImageRequest) -> Result<GeneratedImage, ModelError> {
        tracing::debug!(prompt_len = request.prompt.len(), "FakeImageClient: returning placeholder");
        tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        Ok(GeneratedImage {
            data: PLACEHOLDER_PNG.to_vec(),
            source_url: None,
        })
    }
}
