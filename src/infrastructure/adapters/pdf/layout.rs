//! 排版：把 Book 转换成与 PDF 库无关的页面列表
//!
//! 页面顺序：调试页、4 张空白页、书名页、印刷日期页、2 张空白页、目录、空白页、
//! 序言 + 空白、楔子 + 空白、各章节（标题页、插图页、正文）、空白 + 尾声

use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::book::paragraphs;
use crate::domain::Book;

/// 页面宽度（140mm）
pub const PAGE_WIDTH: f32 = 396.85;
/// 页面高度（216mm）
pub const PAGE_HEIGHT: f32 = 612.28;
pub const MARGIN: f32 = 45.0;

const BODY_SIZE: f32 = 10.5;
const BODY_LEADING: f32 = 14.5;
const HEADING_SIZE: f32 = 16.0;
const MONO_SIZE: f32 = 6.5;
const MONO_LEADING: f32 = 8.0;
const PARAGRAPH_INDENT: f32 = 14.0;

/// 使用的标准字体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
    Mono,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [Self::Regular, Self::Bold, Self::Italic, Self::Mono];

    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Italic => "F3",
            Self::Mono => "F4",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Times-Roman",
            Self::Bold => "Times-Bold",
            Self::Italic => "Times-Italic",
            Self::Mono => "Courier",
        }
    }

    /// 近似字宽（单位：em）
    fn char_width(self, c: char) -> f32 {
        if self == Self::Mono {
            return 0.6;
        }
        let base = match c {
            ' ' | 'i' | 'j' | 'l' | '\'' | ',' | '.' | ';' | ':' | '!' | '|' => 0.28,
            'f' | 't' | 'r' | 'I' | '(' | ')' | '-' => 0.34,
            'm' | 'w' | 'M' | 'W' => 0.78,
            'A'..='Z' => 0.67,
            '0'..='9' => 0.5,
            _ => 0.46,
        };
        if self == Self::Bold {
            base * 1.06
        } else {
            base
        }
    }

    pub fn text_width(self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum::<f32>() * size
    }
}

/// 单行文本（坐标为基线左端，原点在左下角）
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub face: FontFace,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// 一页
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<TextLine>,
    pub image: Option<PathBuf>,
}

impl Page {
    pub fn is_blank(&self) -> bool {
        self.lines.is_empty() && self.image.is_none()
    }
}

/// 贪心按词折行，超长单词单独成行
pub fn wrap(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if face.text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// 等宽文本按字符数硬折行，保留行首缩进
fn wrap_mono(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let per_line = ((max_width / (0.6 * size)) as usize).max(1);
    let mut lines = Vec::new();
    for raw in text.lines() {
        let chars: Vec<char> = raw.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(per_line) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}

struct Composer {
    pages: Vec<Page>,
    anchors: HashMap<String, usize>,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            anchors: HashMap::new(),
        }
    }

    fn text_width() -> f32 {
        PAGE_WIDTH - 2.0 * MARGIN
    }

    fn blank(&mut self, count: usize) {
        for _ in 0..count {
            self.pages.push(Page::default());
        }
    }

    fn anchor(&mut self, name: &str) {
        self.anchors.insert(name.to_string(), self.pages.len());
    }

    /// 内容块整体垂直居中、逐行水平居中
    fn centered(&mut self, blocks: &[(FontFace, f32, &str)]) {
        let mut rows = Vec::new();
        for (face, size, text) in blocks {
            for line in wrap(text, *face, *size, Self::text_width()) {
                rows.push((*face, *size, line));
            }
            rows.push((*face, *size * 0.6, String::new()));
        }
        rows.pop();

        let total: f32 = rows.iter().map(|(_, size, _)| size * 1.3).sum();
        let mut y = (PAGE_HEIGHT + total) / 2.0;
        let mut page = Page::default();
        for (face, size, text) in rows {
            y -= size * 1.3;
            if text.is_empty() {
                continue;
            }
            let x = (PAGE_WIDTH - face.text_width(&text, size)) / 2.0;
            page.lines.push(TextLine {
                face,
                size,
                x,
                y,
                text,
            });
        }
        self.pages.push(page);
    }

    /// 标题 + 段落流式排版，自动分页
    fn flow(&mut self, heading: Option<&str>, body: &str) {
        let width = Self::text_width();
        let mut page = Page::default();
        let mut y = PAGE_HEIGHT - MARGIN;

        if let Some(heading) = heading {
            y -= HEADING_SIZE;
            let x = (PAGE_WIDTH - FontFace::Bold.text_width(heading, HEADING_SIZE)) / 2.0;
            page.lines.push(TextLine {
                face: FontFace::Bold,
                size: HEADING_SIZE,
                x,
                y,
                text: heading.to_string(),
            });
            y -= HEADING_SIZE * 1.5;
        }

        for paragraph in paragraphs(body) {
            let lines = wrap(paragraph, FontFace::Regular, BODY_SIZE, width - PARAGRAPH_INDENT);
            for (i, text) in lines.into_iter().enumerate() {
                y -= BODY_LEADING;
                if y < MARGIN {
                    self.pages.push(std::mem::take(&mut page));
                    y = PAGE_HEIGHT - MARGIN - BODY_LEADING;
                }
                let x = if i == 0 { MARGIN + PARAGRAPH_INDENT } else { MARGIN };
                page.lines.push(TextLine {
                    face: FontFace::Regular,
                    size: BODY_SIZE,
                    x,
                    y,
                    text,
                });
            }
            y -= BODY_LEADING * 0.4;
        }

        self.pages.push(page);
    }

    fn mono(&mut self, text: &str) {
        let mut page = Page::default();
        let mut y = PAGE_HEIGHT - MARGIN;
        for line in wrap_mono(text, MONO_SIZE, Self::text_width()) {
            y -= MONO_LEADING;
            if y < MARGIN {
                self.pages.push(std::mem::take(&mut page));
                y = PAGE_HEIGHT - MARGIN - MONO_LEADING;
            }
            if line.trim().is_empty() {
                continue;
            }
            page.lines.push(TextLine {
                face: FontFace::Mono,
                size: MONO_SIZE,
                x: MARGIN,
                y,
                text: line,
            });
        }
        self.pages.push(page);
    }

    fn image(&mut self, path: PathBuf) {
        self.pages.push(Page {
            lines: Vec::new(),
            image: Some(path),
        });
    }

    /// 目录页（页码在所有页面排完后回填）
    fn fill_toc(&mut self, toc_page: usize, entries: &[(String, String)]) {
        let width = Self::text_width();
        let mut page = Page::default();
        let mut y = PAGE_HEIGHT - MARGIN - HEADING_SIZE;
        let heading = "Table of Contents";
        page.lines.push(TextLine {
            face: FontFace::Bold,
            size: HEADING_SIZE,
            x: (PAGE_WIDTH - FontFace::Bold.text_width(heading, HEADING_SIZE)) / 2.0,
            y,
            text: heading.to_string(),
        });
        y -= HEADING_SIZE * 1.5;

        for (title, anchor) in entries {
            y -= BODY_LEADING * 1.2;
            let number = self
                .anchors
                .get(anchor)
                .map(|index| (index + 1).to_string())
                .unwrap_or_default();
            let number_width = FontFace::Regular.text_width(&number, BODY_SIZE);
            let title = wrap(title, FontFace::Regular, BODY_SIZE, width - 40.0)
                .into_iter()
                .next()
                .unwrap_or_default();
            let title_width = FontFace::Regular.text_width(&title, BODY_SIZE);
            let dot_width = FontFace::Regular.text_width(".", BODY_SIZE);
            let gap = width - title_width - number_width - 2.0 * dot_width;
            let dots = if gap > 0.0 { (gap / dot_width) as usize } else { 0 };

            page.lines.push(TextLine {
                face: FontFace::Regular,
                size: BODY_SIZE,
                x: MARGIN,
                y,
                text: format!("{} {}", title, ".".repeat(dots)),
            });
            page.lines.push(TextLine {
                face: FontFace::Regular,
                size: BODY_SIZE,
                x: PAGE_WIDTH - MARGIN - number_width,
                y,
                text: number,
            });
        }

        self.pages[toc_page] = page;
    }
}

/// 排版整本书
pub fn compose(book: &Book, theme: &str, print_date: &str) -> Vec<Page> {
    let mut composer = Composer::new();

    // 调试页：请求描述 + 实体上下文
    composer.flow(Some("Reference Data"), &book.debug().request_line);
    composer.mono(&book.debug().context_json);

    composer.blank(4);

    let subtitle = format!("A {} FAN NOVEL", theme.to_uppercase());
    composer.centered(&[
        (FontFace::Bold, 24.0, book.title()),
        (FontFace::Regular, 11.0, &subtitle),
    ]);
    composer.centered(&[
        (FontFace::Italic, 11.0, "A personalized edition created on"),
        (FontFace::Italic, 11.0, print_date),
    ]);

    composer.blank(2);
    let toc_page = composer.pages.len();
    // 目录占位页 + 空白页
    composer.blank(2);

    if !book.preface().is_empty() {
        composer.anchor("preface");
        composer.flow(Some("Preface"), book.preface());
        composer.blank(1);
    }
    if !book.prologue().is_empty() {
        composer.anchor("prologue");
        composer.flow(Some("Prologue"), book.prologue());
        composer.blank(1);
    }

    for (i, chapter) in book.chapters().iter().enumerate() {
        let number = format!("Chapter {}", i + 1);
        composer.anchor(&format!("chapter-{}", i + 1));
        composer.centered(&[
            (FontFace::Italic, 12.0, &number),
            (FontFace::Bold, 20.0, chapter.heading()),
        ]);
        if let Some(path) = chapter.image_path() {
            composer.image(path.to_path_buf());
        }
        composer.flow(None, chapter.content());
    }

    if !book.epilogue().is_empty() {
        composer.blank(1);
        composer.anchor("epilogue");
        composer.flow(Some("Epilogue"), book.epilogue());
    }

    let entries: Vec<(String, String)> = book
        .table_of_contents()
        .into_iter()
        .map(|e| (e.title, e.anchor))
        .collect();
    composer.fill_toc(toc_page, &entries);

    composer.pages
}
