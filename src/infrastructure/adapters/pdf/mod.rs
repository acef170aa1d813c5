//! PDF Adapter - 书籍排版与 PDF 输出

mod layout;
mod lopdf_renderer;

pub use lopdf_renderer::{LopdfRenderer, LopdfRendererConfig};
