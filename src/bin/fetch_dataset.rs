//! fetch_dataset - 从参考 API 抓取数据集到本地 JSON 文件
//!
//! 与服务共用配置（dataset.* / HOLONOVEL_DATASET__*），服务启动前运行一次即可

use holonovel::config::load_config;
use holonovel::infrastructure::adapters::ReferenceApiFetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .init();

    let dataset = &config.dataset;
    tracing::info!(
        base_url = %dataset.api_base_url,
        dir = %dataset.dir.display(),
        "Fetching reference dataset"
    );
    if dataset.accept_invalid_certs {
        tracing::warn!("TLS certificate verification is disabled");
    }

    let fetcher = ReferenceApiFetcher::new(dataset.fetcher_config())?;
    let reports = fetcher.fetch_all(&dataset.dir).await?;

    let mut total = 0;
    for report in &reports {
        total += report.records;
        match &report.file {
            Some(path) => tracing::info!(
                category = %report.category,
                records = report.records,
                "Saved {}",
                path.display()
            ),
            None => tracing::warn!(category = %report.category, "No records fetched, file not written"),
        }
    }

    tracing::info!(categories = reports.len(), records = total, "Dataset fetch complete");
    Ok(())
}
