//! Book Context - 书籍限界上下文
//!
//! 职责:
//! - 篇幅规划（页数 -> 章节数/每章字数）
//! - 书籍与章节实体
//! - 文件名生成

mod entities;
mod plan;
mod value_objects;

pub use entities::{paragraphs, Book, Chapter, DebugContext, TocEntry};
pub use plan::{
    plan, BookPlan, CONTENT_PAGES_PER_CHAPTER, FIXED_OVERHEAD_PAGES, MAX_CHAPTERS,
    PER_CHAPTER_OVERHEAD_PAGES, WORDS_PER_PAGE,
};
pub use value_objects::{book_file_name, clean_title, title_slug};
