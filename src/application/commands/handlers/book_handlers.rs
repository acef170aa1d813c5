//! Book Command Handlers

use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::commands::{GenerateBook, GenerateBookResponse};
use crate::application::error::ApplicationError;
use crate::application::generation::{ChapterPipeline, EntitySelector};
use crate::application::ports::BookRendererPort;
use crate::domain::book::{book_file_name, plan};

/// GenerateBook 的运行参数
#[derive(Debug, Clone, Copy)]
pub struct GenerateBookSettings {
    /// 页数上限
    pub max_pages: u32,
    /// 预览字符数
    pub preview_chars: usize,
}

impl Default for GenerateBookSettings {
    fn default() -> Self {
        Self {
            max_pages: 100,
            preview_chars: 1500,
        }
    }
}

/// GenerateBook Handler
///
/// 流程：校验 -> 规划篇幅 -> 选择实体 -> 流水线生成 -> 渲染 PDF
pub struct GenerateBookHandler {
    selector: EntitySelector,
    pipeline: ChapterPipeline,
    renderer: Arc<dyn BookRendererPort>,
    settings: GenerateBookSettings,
}

impl GenerateBookHandler {
    pub fn new(
        selector: EntitySelector,
        pipeline: ChapterPipeline,
        renderer: Arc<dyn BookRendererPort>,
        settings: GenerateBookSettings,
    ) -> Self {
        Self {
            selector,
            pipeline,
            renderer,
            settings,
        }
    }

    pub async fn handle(&self, command: GenerateBook) -> Result<GenerateBookResponse, ApplicationError> {
        let prompt = command.user_input.trim().to_string();
        if prompt.is_empty() {
            return Err(ApplicationError::validation("Prompt cannot be empty."));
        }

        let pages = command.num_pages.min(self.settings.max_pages);
        let span = tracing::info_span!("generate_book", run_id = %Uuid::new_v4());
        self.generate(prompt, pages).instrument(span).await
    }

    async fn generate(&self, prompt: String, pages: u32) -> Result<GenerateBookResponse, ApplicationError> {
        let book_plan = plan(pages);
        tracing::info!(
            pages,
            chapters = book_plan.chapter_count(),
            words_per_chapter = book_plan.target_words_per_chapter(),
            "Processing book request"
        );

        let context = self.selector.select(&prompt).await?;
        let book = self.pipeline.write_book(&prompt, &context, book_plan).await?;

        let title = book.title().to_string();
        let preview = book.preview(self.settings.preview_chars);
        let file_name = book_file_name(&title);

        tracing::info!(file = %file_name, "Rendering PDF");
        let renderer = self.renderer.clone();
        let render_name = file_name.clone();
        let pdf_path = tokio::task::spawn_blocking(move || renderer.render(&book, &render_name))
            .await
            .map_err(|e| ApplicationError::internal(format!("Render task failed: {}", e)))??;

        tracing::info!(path = %pdf_path.display(), title = %title, "Book generated");

        Ok(GenerateBookResponse {
            title,
            prompt,
            file_name,
            pdf_path,
            preview,
        })
    }
}
