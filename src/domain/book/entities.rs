//! Book Context - Entities

use serde::Serialize;
use std::path::{Path, PathBuf};

/// 章节
///
/// 不变量:
/// - 由流水线一次性组装完成，之后不再修改
/// - image_path 为空表示插图生成失败或未生成
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    heading: String,
    content: String,
    image_path: Option<PathBuf>,
}

impl Chapter {
    pub fn new(heading: impl Into<String>, content: impl Into<String>, image_path: Option<PathBuf>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
            image_path,
        }
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }
}

/// 调试信息（渲染在文档最前面两页）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugContext {
    /// 用户请求描述
    pub request_line: String,
    /// 选中实体上下文的 JSON 文本
    pub context_json: String,
}

/// 目录条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub anchor: String,
}

/// 书籍 - 流水线的最终产物，交给文档渲染器
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    title: String,
    preface: String,
    prologue: String,
    epilogue: String,
    chapters: Vec<Chapter>,
    debug: DebugContext,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        preface: impl Into<String>,
        prologue: impl Into<String>,
        epilogue: impl Into<String>,
        chapters: Vec<Chapter>,
        debug: DebugContext,
    ) -> Self {
        Self {
            title: title.into(),
            preface: preface.into(),
            prologue: prologue.into(),
            epilogue: epilogue.into(),
            chapters,
            debug,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn preface(&self) -> &str {
        &self.preface
    }

    pub fn prologue(&self) -> &str {
        &self.prologue
    }

    pub fn epilogue(&self) -> &str {
        &self.epilogue
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn debug(&self) -> &DebugContext {
        &self.debug
    }

    /// 生成目录：序言、楔子、各章节、尾声（空文本的部分不列出）
    pub fn table_of_contents(&self) -> Vec<TocEntry> {
        let mut entries = Vec::with_capacity(self.chapters.len() + 3);

        if !self.preface.is_empty() {
            entries.push(TocEntry {
                title: "Preface".to_string(),
                anchor: "preface".to_string(),
            });
        }
        if !self.prologue.is_empty() {
            entries.push(TocEntry {
                title: "Prologue".to_string(),
                anchor: "prologue".to_string(),
            });
        }
        for (i, chapter) in self.chapters.iter().enumerate() {
            entries.push(TocEntry {
                title: chapter.heading.clone(),
                anchor: format!("chapter-{}", i + 1),
            });
        }
        if !self.epilogue.is_empty() {
            entries.push(TocEntry {
                title: "Epilogue".to_string(),
                anchor: "epilogue".to_string(),
            });
        }

        entries
    }

    /// 楔子预览：取前 max_chars 个字符并追加省略号
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.prologue.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

/// 按空行切分段落
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n").map(str::trim).filter(|p| !p.is_empty())
}
