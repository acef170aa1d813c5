//! Dataset Adapter - 参考数据集加载与收集

mod json_dataset_loader;
mod reference_api_fetcher;

pub use json_dataset_loader::{load_dataset, DatasetError};
pub use reference_api_fetcher::{CategoryReport, FetcherConfig, ReferenceApiFetcher};
