//! Holonovel - 主题小说生成服务
//!
//! 启动顺序：配置 -> 日志 -> 数据集 -> 模型客户端 -> 生成流程 -> HTTP 服务

use std::sync::Arc;

use holonovel::application::ports::{ImageModelPort, TextModelPort};
use holonovel::application::{ChapterPipeline, EntitySelector, GenerateBookHandler, Illustrator};
use holonovel::config::{load_config, print_config, require_api_key, AppConfig, LogConfig};
use holonovel::infrastructure::adapters::{
    load_dataset, FakeImageClient, FakeLlmConfig, FakeTextClient, FileImageStorage, LopdfRenderer,
    LopdfRendererConfig, OpenAiConfig, OpenAiImageClient, OpenAiTextClient,
};
use holonovel::infrastructure::http::{AppState, HttpServer, ServerConfig};
use holonovel::infrastructure::pacing::{
    FixedDelayPacer, RequestThrottle, ThrottledImageModel, ThrottledTextModel,
};

/// 初始化日志
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},holonovel={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 创建模型客户端（可选 fake 模式与限速）
fn build_models(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn TextModelPort>, Arc<dyn ImageModelPort>)> {
    let llm = &config.llm;

    let (text, image): (Arc<dyn TextModelPort>, Arc<dyn ImageModelPort>) = if llm.fake {
        tracing::warn!("Using fake LLM clients, generated books will contain canned text");
        (
            Arc::new(FakeTextClient::new(FakeLlmConfig::default())),
            Arc::new(FakeImageClient::new(FakeLlmConfig::default())),
        )
    } else {
        let openai = OpenAiConfig {
            text_model: llm.text_model.clone(),
            image_model: llm.image_model.clone(),
            image_size: llm.image_size.clone(),
            image_quality: llm.image_quality.clone(),
            ..OpenAiConfig::new(&llm.base_url, &llm.api_key).with_timeout(llm.timeout_secs)
        };
        (
            Arc::new(OpenAiTextClient::new(openai.clone())?),
            Arc::new(OpenAiImageClient::new(openai)?),
        )
    };

    // 文本与图片共享同一个限速器
    let throttle = RequestThrottle::per_minute(llm.requests_per_minute);
    if !throttle.is_enabled() {
        return Ok((text, image));
    }

    Ok((
        Arc::new(ThrottledTextModel::new(text, throttle.clone())),
        Arc::new(ThrottledImageModel::new(image, throttle)),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Holonovel - {} novel generator", config.generation.theme);
    print_config(&config);
    require_api_key(&config)?;

    // 数据集缺失时直接退出，提示先运行 fetch_dataset
    let dataset = load_dataset(&config.dataset.dir).await.map_err(|e| {
        anyhow::anyhow!("Failed to load dataset (run `fetch_dataset` first): {}", e)
    })?;
    if dataset.is_empty() {
        tracing::warn!("Reference dataset is empty, stories will have no entity context");
    }
    tracing::info!(
        records = dataset.len(),
        categories = ?dataset.category_names().collect::<Vec<_>>(),
        "Reference dataset loaded"
    );

    tokio::fs::create_dir_all(&config.storage.books_dir).await?;

    let (text_model, image_model) = build_models(&config)?;
    let image_storage = Arc::new(FileImageStorage::new(&config.storage.images_dir).await?);

    let theme = config.generation.theme.clone();
    let selector = EntitySelector::new(theme.clone(), text_model.clone(), Arc::new(dataset));
    let illustrator = Illustrator::new(theme.clone(), text_model.clone(), image_model, image_storage);
    let pacer = Arc::new(FixedDelayPacer::from_millis(
        config.generation.section_cooldown_ms,
        config.generation.chapter_cooldown_ms,
    ));
    let pipeline = ChapterPipeline::new(
        config.generation.pipeline_config(),
        text_model,
        illustrator,
        pacer,
    );
    let renderer = Arc::new(LopdfRenderer::new(LopdfRendererConfig {
        output_dir: config.storage.books_dir.clone(),
        theme,
    }));

    let handler = GenerateBookHandler::new(
        selector,
        pipeline,
        renderer,
        config.generation.handler_settings(),
    );

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_books(&config.storage.books_dir, &config.storage.books_url_prefix);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_files(
            &config.server.static_files.path,
            &config.server.static_files.dir,
        );
    }
    let state = AppState::new(
        handler,
        config.generation.default_pages,
        &config.storage.books_url_prefix,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
