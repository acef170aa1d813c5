//! lopdf Book Renderer - 实现 BookRendererPort
//!
//! 只使用 PDF 标准字体（WinAnsiEncoding），插图以 XObject 嵌入并等比缩放

use chrono::Local;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::{Path, PathBuf};

use super::layout::{compose, FontFace, Page, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use crate::application::ports::{BookRendererPort, RenderError};
use crate::domain::Book;

/// lopdf 渲染器配置
#[derive(Debug, Clone)]
pub struct LopdfRendererConfig {
    /// PDF 输出目录
    pub output_dir: PathBuf,
    /// 题材（副标题）
    pub theme: String,
}

/// lopdf 渲染器
pub struct LopdfRenderer {
    config: LopdfRendererConfig,
}

impl LopdfRenderer {
    pub fn new(config: LopdfRendererConfig) -> Self {
        Self { config }
    }

    fn build_document(&self, pages: &[Page]) -> Result<Document, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for face in FontFace::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let fonts_id = doc.add_object(fonts);
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts_id,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in pages {
            let page_id = self.add_page(&mut doc, pages_id, fonts_id, page)?;
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    fn add_page(
        &self,
        doc: &mut Document,
        pages_id: ObjectId,
        fonts_id: ObjectId,
        page: &Page,
    ) -> Result<ObjectId, RenderError> {
        let mut operations = Vec::new();
        for line in &page.lines {
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![line.face.resource_name().into(), line.size.into()]),
                Operation::new(
                    "Tm",
                    vec![1.into(), 0.into(), 0.into(), 1.into(), line.x.into(), line.y.into()],
                ),
                Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ]);
        }

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        };

        if let Some(path) = &page.image {
            match embed_image(doc, path) {
                Ok((image_id, width, height)) => {
                    let (w, h, x, y) = fit_image(width, height);
                    operations.extend([
                        Operation::new("q", vec![]),
                        Operation::new(
                            "cm",
                            vec![w.into(), 0.into(), 0.into(), h.into(), x.into(), y.into()],
                        ),
                        Operation::new("Do", vec!["Im1".into()]),
                        Operation::new("Q", vec![]),
                    ]);
                    page_dict.set(
                        "Resources",
                        dictionary! {
                            "Font" => fonts_id,
                            "XObject" => dictionary! { "Im1" => image_id },
                        },
                    );
                }
                Err(e) => {
                    // 插图文件缺失或损坏时保留空白页
                    tracing::warn!(path = %path.display(), error = %e, "Skipping chapter image");
                }
            }
        }

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::PdfError(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        page_dict.set("Contents", content_id);

        Ok(doc.add_object(page_dict))
    }
}

impl BookRendererPort for LopdfRenderer {
    fn render(&self, book: &Book, file_name: &str) -> Result<PathBuf, RenderError> {
        std::fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| RenderError::IoError(e.to_string()))?;

        let print_date = Local::now().format("%B %d, %Y").to_string();
        let pages = compose(book, &self.config.theme, &print_date);
        tracing::debug!(pages = pages.len(), "Book layout composed");

        let mut doc = self.build_document(&pages)?;
        doc.compress();

        let path = self.config.output_dir.join(file_name);
        doc.save(&path)
            .map_err(|e| RenderError::IoError(e.to_string()))?;

        tracing::info!(path = %path.display(), pages = pages.len(), "PDF written");
        Ok(path)
    }
}

/// 读取图片并加入文档，返回 (对象 ID, 宽, 高)
fn embed_image(doc: &mut Document, path: &Path) -> Result<(ObjectId, f32, f32), RenderError> {
    let stream = lopdf::xobject::image(path).map_err(|e| RenderError::PdfError(e.to_string()))?;
    let dimension = |key: &[u8]| {
        stream
            .dict
            .get(key)
            .and_then(Object::as_i64)
            .map(|v| v as f32)
            .map_err(|e| RenderError::PdfError(e.to_string()))
    };
    let width = dimension(b"Width")?;
    let height = dimension(b"Height")?;
    Ok((doc.add_object(stream), width, height))
}

/// 在页边距内等比缩放并居中，返回 (宽, 高, x, y)
fn fit_image(width: f32, height: f32) -> (f32, f32, f32, f32) {
    let max_w = PAGE_WIDTH - 2.0 * MARGIN;
    let max_h = PAGE_HEIGHT - 2.0 * MARGIN;
    let scale = (max_w / width.max(1.0)).min(max_h / height.max(1.0));
    let (w, h) = (width * scale, height * scale);
    (w, h, (PAGE_WIDTH - w) / 2.0, (PAGE_HEIGHT - h) / 2.0)
}

/// 转换为 WinAnsiEncoding 字节，无法表示的字符替换为 '?'
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            '\u{20AC}' => 0x80,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chapter, DebugContext};
    use tempfile::tempdir;

    /// 1x1 RGB PNG
    const PIXEL_PNG: [u8; 69] = [
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00,
        0x00, 0x90, 0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9c, 0x63, 0xd0, 0xb0, 0x89, 0x02, 0x00, 0x01, 0x4e, 0x00, 0xbf, 0x8a, 0xf6, 0x3d,
        0xe3, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    fn book(image: Option<PathBuf>) -> Book {
        Book::new(
            "The Long Night",
            "A preface.",
            "It was a dark night\u{2014}the kind that \u{201C}ends\u{201D} things.",
            "An epilogue.",
            vec![Chapter::new("Into the Storm", "First.\n\nSecond (with parens).", image)],
            DebugContext {
                request_line: "User Prompt: Leia on Hoth".to_string(),
                context_json: "{\n  \"people\": []\n}".to_string(),
            },
        )
    }

    fn renderer(dir: &Path) -> LopdfRenderer {
        LopdfRenderer::new(LopdfRendererConfig {
            output_dir: dir.join("books"),
            theme: "Star Wars".to_string(),
        })
    }

    #[test]
    fn test_render_writes_pdf() {
        let temp_dir = tempdir().unwrap();
        let renderer = renderer(temp_dir.path());

        let path = renderer.render(&book(None), "The_Long_Night.pdf").unwrap();

        assert_eq!(path, temp_dir.path().join("books/The_Long_Night.pdf"));
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 20);
    }

    #[test]
    fn test_render_embeds_image() {
        let temp_dir = tempdir().unwrap();
        let image_path = temp_dir.path().join("pixel.png");
        std::fs::write(&image_path, PIXEL_PNG).unwrap();

        let path = renderer(temp_dir.path())
            .render(&book(Some(image_path)), "illustrated.pdf")
            .unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 21);
    }

    #[test]
    fn test_missing_image_keeps_page() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("gone.png");

        let path = renderer(temp_dir.path())
            .render(&book(Some(missing)), "missing.pdf")
            .unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 21);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Hi"), b"Hi".to_vec());
        assert_eq!(encode_win_ansi("\u{2014}\u{2019}"), vec![0x97, 0x92]);
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("\u{4e2d}"), vec![b'?']);
    }

    #[test]
    fn test_fit_image_keeps_aspect() {
        let (w, h, x, y) = fit_image(1024.0, 1792.0);
        assert!((w / h - 1024.0 / 1792.0).abs() < 1e-3);
        assert!(w <= PAGE_WIDTH - 2.0 * MARGIN + 0.01);
        assert!(h <= PAGE_HEIGHT - 2.0 * MARGIN + 0.01);
        assert!((x - (PAGE_WIDTH - w) / 2.0).abs() < 1e-3);
        assert!(y >= MARGIN - 0.01);
    }
}
