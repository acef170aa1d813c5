//! LLM Adapter - OpenAI 兼容文本/图片客户端

mod fake_llm_client;
mod openai_config;
mod openai_image_client;
mod openai_text_client;

pub use fake_llm_client::{FakeImageClient, FakeLlmConfig, FakeTextClient};
pub use openai_config::OpenAiConfig;
pub use openai_image_client::OpenAiImageClient;
pub use openai_text_client::OpenAiTextClient;
