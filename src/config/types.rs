//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::{GenerateBookSettings, PipelineConfig};
use crate::infrastructure::adapters::FetcherConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 文本/图片模型配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 生成参数
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 参考数据集配置
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置（网页前端）
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_enabled() -> bool {
    false
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

/// 模型服务配置（OpenAI 兼容接口）
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API 基础 URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API Key，为空时回退到 OPENAI_API_KEY
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_image_model")]
    pub image_model: String,

    #[serde(default = "default_image_size")]
    pub image_size: String,

    #[serde(default = "default_image_quality")]
    pub image_quality: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// 每分钟请求数上限，0 表示不限速
    #[serde(default)]
    pub requests_per_minute: u32,

    /// 使用离线 Fake 客户端
    #[serde(default)]
    pub fake: bool,
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_text_model() -> String {
    "gpt-4-1106-preview".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1792".to_string()
}

fn default_image_quality() -> String {
    "standard".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: String::new(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            image_size: default_image_size(),
            image_quality: default_image_quality(),
            timeout_secs: default_llm_timeout(),
            requests_per_minute: 0,
            fake: false,
        }
    }
}

/// 生成参数
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// 题材
    #[serde(default = "default_theme")]
    pub theme: String,

    /// 单次正文调用的目标字数上限
    #[serde(default = "default_section_word_target")]
    pub section_word_target: u32,

    /// 楔子与尾声的目标字数
    #[serde(default = "default_front_matter_words")]
    pub front_matter_words: u32,

    /// 序言目标字数，0 表示使用默认序言
    #[serde(default)]
    pub preface_words: u32,

    /// 页数上限
    #[serde(default = "default_pages")]
    pub max_pages: u32,

    /// 请求未指定页数时的默认值
    #[serde(default = "default_pages")]
    pub default_pages: u32,

    /// 节间冷却（毫秒）
    #[serde(default = "default_section_cooldown")]
    pub section_cooldown_ms: u64,

    /// 章间冷却（毫秒）
    #[serde(default = "default_chapter_cooldown")]
    pub chapter_cooldown_ms: u64,

    /// 摘要失败时保留的字符数
    #[serde(default = "default_summary_fallback_chars")]
    pub summary_fallback_chars: usize,

    /// 响应中楔子预览的字符数
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_theme() -> String {
    "Star Wars".to_string()
}

fn default_section_word_target() -> u32 {
    750
}

fn default_front_matter_words() -> u32 {
    250
}

fn default_pages() -> u32 {
    100
}

fn default_section_cooldown() -> u64 {
    2000
}

fn default_chapter_cooldown() -> u64 {
    4000
}

fn default_summary_fallback_chars() -> usize {
    300
}

fn default_preview_chars() -> usize {
    1500
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            section_word_target: default_section_word_target(),
            front_matter_words: default_front_matter_words(),
            preface_words: 0,
            max_pages: default_pages(),
            default_pages: default_pages(),
            section_cooldown_ms: default_section_cooldown(),
            chapter_cooldown_ms: default_chapter_cooldown(),
            summary_fallback_chars: default_summary_fallback_chars(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl GenerationConfig {
    /// 流水线参数
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            theme: self.theme.clone(),
            section_word_target: self.section_word_target,
            front_matter_words: self.front_matter_words,
            preface_words: self.preface_words,
            summary_fallback_chars: self.summary_fallback_chars,
        }
    }

    /// 命令处理参数
    pub fn handler_settings(&self) -> GenerateBookSettings {
        GenerateBookSettings {
            max_pages: self.max_pages,
            preview_chars: self.preview_chars,
        }
    }
}

/// 参考数据集配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// 数据集目录
    #[serde(default = "default_dataset_dir")]
    pub dir: PathBuf,

    /// 参考 API 基础 URL（仅 fetch_dataset 使用）
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// 抓取的类别
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// 页间延迟（毫秒）
    #[serde(default = "default_page_delay")]
    pub page_delay_ms: u64,

    /// 请求超时时间（秒）
    #[serde(default = "default_dataset_timeout")]
    pub timeout_secs: u64,

    /// 是否跳过证书校验
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_dataset_dir() -> PathBuf {
    PathBuf::from("swapi_data")
}

fn default_api_base_url() -> String {
    "https://swapi.dev/api".to_string()
}

fn default_categories() -> Vec<String> {
    ["people", "planets", "starships", "vehicles", "species", "films"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_page_delay() -> u64 {
    100
}

fn default_dataset_timeout() -> u64 {
    20
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            dir: default_dataset_dir(),
            api_base_url: default_api_base_url(),
            categories: default_categories(),
            page_delay_ms: default_page_delay(),
            timeout_secs: default_dataset_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl DatasetConfig {
    /// 抓取工具参数
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            base_url: self.api_base_url.clone(),
            categories: self.categories.clone(),
            page_delay_ms: self.page_delay_ms,
            timeout_secs: self.timeout_secs,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// PDF 输出目录
    #[serde(default = "default_books_dir")]
    pub books_dir: PathBuf,

    /// 插图存储目录
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// PDF 对外访问的 URL 前缀
    #[serde(default = "default_books_url_prefix")]
    pub books_url_prefix: String,
}

fn default_books_dir() -> PathBuf {
    PathBuf::from("generated_books")
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("generated_images")
}

fn default_books_url_prefix() -> String {
    "/generated_books".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            books_dir: default_books_dir(),
            images_dir: default_images_dir(),
            books_url_prefix: default_books_url_prefix(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5060);
        assert_eq!(config.llm.text_model, "gpt-4-1106-preview");
        assert_eq!(config.generation.section_word_target, 750);
        assert_eq!(config.dataset.dir, PathBuf::from("swapi_data"));
        assert_eq!(config.dataset.categories.len(), 6);
    }

    #[test]
    fn test_static_files_default_disabled() {
        let config = ServerConfig::default();
        assert!(!config.static_files.enabled);
        assert_eq!(config.static_files.path, "/");
    }

    #[test]
    fn test_pipeline_config_mapping() {
        let mut generation = GenerationConfig::default();
        generation.theme = "Dune".to_string();
        generation.preface_words = 300;

        let pipeline = generation.pipeline_config();
        assert_eq!(pipeline.theme, "Dune");
        assert_eq!(pipeline.preface_words, 300);
        assert_eq!(pipeline.section_word_target, 750);
        assert_eq!(generation.handler_settings().max_pages, 100);
    }
}
