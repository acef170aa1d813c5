//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod book_renderer;
mod image_model;
mod image_storage;
mod pacer;
mod text_model;

pub use book_renderer::{BookRendererPort, RenderError};
pub use image_model::{GeneratedImage, ImageModelPort, ImageRequest};
pub use image_storage::{ImageStorageError, ImageStoragePort};
pub use pacer::{PacePoint, PacerPort};
pub use text_model::{CompletionRequest, ModelError, TextModelPort};
