//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`.env` 文件会先被加载到环境中）
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 未配置 llm.api_key 时读取的环境变量
const API_KEY_FALLBACK_VAR: &str = "OPENAI_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `HOLONOVEL_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `HOLONOVEL_SERVER__PORT=8080`
/// - `HOLONOVEL_LLM__API_KEY=sk-...`（或直接使用 `OPENAI_API_KEY`）
/// - `HOLONOVEL_LLM__FAKE=true`
/// - `HOLONOVEL_DATASET__CATEGORIES=people,planets`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("llm.base_url", "https://api.openai.com/v1")?
        .set_default("llm.timeout_secs", 120)?
        .set_default("generation.theme", "Star Wars")?
        .set_default("generation.max_pages", 100)?
        .set_default("dataset.dir", "swapi_data")?
        .set_default("storage.books_dir", "generated_books")?
        .set_default("storage.images_dir", "generated_images")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: HOLONOVEL_LLM__TEXT_MODEL=gpt-4o
    builder = builder.add_source(
        Environment::with_prefix("HOLONOVEL")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("dataset.categories")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    apply_api_key_fallback(&mut app_config, std::env::var(API_KEY_FALLBACK_VAR).ok());
    validate_config(&app_config)?;

    Ok(app_config)
}

fn apply_api_key_fallback(config: &mut AppConfig, fallback: Option<String>) {
    if config.llm.api_key.is_empty() {
        if let Some(key) = fallback.filter(|k| !k.trim().is_empty()) {
            config.llm.api_key = key.trim().to_string();
        }
    }
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.llm.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM base URL cannot be empty".to_string(),
        ));
    }

    if config.dataset.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Dataset directory cannot be empty".to_string(),
        ));
    }

    if config.generation.section_word_target == 0 {
        return Err(ConfigError::ValidationError(
            "Section word target cannot be 0".to_string(),
        ));
    }

    if config.generation.max_pages == 0 {
        return Err(ConfigError::ValidationError(
            "Max pages cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    if config.server.static_files.enabled {
        tracing::info!(
            "Static Files: {} -> {:?}",
            config.server.static_files.path,
            config.server.static_files.dir
        );
    }
    if config.llm.fake {
        tracing::info!("LLM: fake (offline)");
    } else {
        tracing::info!("LLM Base URL: {}", config.llm.base_url);
        tracing::info!("Text Model: {}", config.llm.text_model);
        tracing::info!("Image Model: {} ({})", config.llm.image_model, config.llm.image_size);
    }
    if config.llm.requests_per_minute > 0 {
        tracing::info!("Rate Limit: {} requests/min", config.llm.requests_per_minute);
    }
    tracing::info!("Theme: {}", config.generation.theme);
    tracing::info!("Max Pages: {}", config.generation.max_pages);
    tracing::info!(
        "Cooldowns: section={}ms, chapter={}ms",
        config.generation.section_cooldown_ms,
        config.generation.chapter_cooldown_ms
    );
    tracing::info!("Dataset Directory: {:?}", config.dataset.dir);
    tracing::info!("Books Directory: {:?}", config.storage.books_dir);
    tracing::info!("Images Directory: {:?}", config.storage.images_dir);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

/// 检查模型服务凭据
///
/// 只有生成服务需要，数据集抓取工具不调用
pub fn require_api_key(config: &AppConfig) -> Result<(), ConfigError> {
    if !config.llm.fake && config.llm.api_key.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "LLM API key is missing: set llm.api_key or {}, or enable llm.fake",
            API_KEY_FALLBACK_VAR
        )));
    }
    Ok(())
}
