//! Storage Adapter - 文件系统存储

mod file_image_storage;

pub use file_image_storage::FileImageStorage;
