//! 章节生成流水线
//!
//! 把每个叙事单元（序言、楔子、尾声、章节）拆成若干节依次生成，
//! 节与节之间用连续性摘要衔接。模型端不保存任何状态，
//! 上一节的内容只能通过摘要传给下一节。
//!
//! 顺序保证:
//! - 同一单元内的节严格串行（下一节依赖上一节的摘要）
//! - 章节之间严格串行（包括插图）
//! - 书名、章节标题、序言、楔子、尾声之间没有依赖，并发生成

use std::sync::Arc;

use super::{GenerationError, Illustrator};
use crate::application::ports::{CompletionRequest, PacePoint, PacerPort, TextModelPort};
use crate::domain::book::{clean_title, Book, BookPlan, Chapter, DebugContext};
use crate::domain::continuity::{scene_setting, Summary, SINGLE_SECTION_OPENING};
use crate::domain::dataset::EntityContext;
use crate::domain::prompts;

/// 默认序言（preface_words 为 0 时使用）
const STOCK_PREFACE: &str = "Long ago, in a setting far from here, the stories were endless. They were tales of heroism and betrayal, of light and darkness, told and retold across countless worlds. What you hold in your hands is one such echo: a story inspired by a fragment of that vast history.

This is a work of fan fiction, a tribute to the {theme} universe that has captured imaginations for generations. It is a 'what if', a new perspective on a familiar galaxy. It was not crafted by a story group or a studio, but by a machine guided by a single prompt, weaving known legends together with new possibilities. May it carry you, once again, into a galaxy of endless adventure.";

/// 流水线配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 题材（写入提示词）
    pub theme: String,
    /// 单次生成调用的目标字数上限
    pub section_word_target: u32,
    /// 楔子与尾声的目标字数
    pub front_matter_words: u32,
    /// 序言目标字数，0 表示使用默认序言
    pub preface_words: u32,
    /// 摘要失败时保留的原文字符数
    pub summary_fallback_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            theme: "Star Wars".to_string(),
            section_word_target: 750,
            front_matter_words: 250,
            preface_words: 0,
            summary_fallback_chars: 300,
        }
    }
}

/// 章节生成流水线
pub struct ChapterPipeline {
    config: PipelineConfig,
    text_model: Arc<dyn TextModelPort>,
    illustrator: Illustrator,
    pacer: Arc<dyn PacerPort>,
}

impl ChapterPipeline {
    pub fn new(
        config: PipelineConfig,
        text_model: Arc<dyn TextModelPort>,
        illustrator: Illustrator,
        pacer: Arc<dyn PacerPort>,
    ) -> Self {
        Self {
            config,
            text_model,
            illustrator,
            pacer,
        }
    }

    /// 单元需要拆分的节数
    ///
    /// 沿用四舍五入（ties-to-even）而不是向上取整：
    /// 目标为上限的 1.49 倍时只生成一节
    pub fn section_count(&self, word_target: u32) -> u32 {
        let ratio = f64::from(word_target) / f64::from(self.config.section_word_target.max(1));
        (ratio.round_ties_even() as u32).max(1)
    }

    /// 生成一个叙事单元的完整文本
    pub async fn generate_unit(
        &self,
        user_prompt: &str,
        unit_title: &str,
        context: &EntityContext,
        word_target: u32,
    ) -> Result<String, GenerationError> {
        tracing::info!(unit = %unit_title, word_target, "Generating unit");

        if word_target == 0 {
            return Ok(String::new());
        }

        if word_target <= self.config.section_word_target {
            return self
                .generate_section(user_prompt, unit_title, SINGLE_SECTION_OPENING, context, word_target)
                .await;
        }

        let sections = self.section_count(word_target);
        let mut parts = Vec::with_capacity(sections as usize);
        let mut summary = scene_setting(unit_title);

        for index in 0..sections {
            tracing::debug!(unit = %unit_title, part = index + 1, total = sections, "Generating section");

            let text = self
                .generate_section(
                    user_prompt,
                    unit_title,
                    &summary,
                    context,
                    self.config.section_word_target,
                )
                .await?;

            let is_last = index + 1 == sections;
            if !is_last {
                summary = self.summarize(&text).await.into_string();
                self.pacer.pause(PacePoint::BetweenSections).await;
            }

            parts.push(text);
        }

        tracing::info!(unit = %unit_title, sections, "Unit finished");
        Ok(parts.join("\n\n"))
    }

    async fn generate_section(
        &self,
        user_prompt: &str,
        unit_title: &str,
        summary: &str,
        context: &EntityContext,
        word_target: u32,
    ) -> Result<String, GenerationError> {
        let request = CompletionRequest::new(
            prompts::section(
                &self.config.theme,
                user_prompt,
                unit_title,
                summary,
                context,
                word_target,
            ),
            0.75,
        )
        .with_max_tokens(1200);

        let text = self
            .text_model
            .complete(request)
            .await
            .map_err(|e| GenerationError::new(unit_title, e))?;

        Ok(text.trim().to_string())
    }

    /// 生成 2-3 句的连续性摘要，失败时退化为原文截断
    pub async fn summarize(&self, text: &str) -> Summary {
        let request = CompletionRequest::new(prompts::summarization(text), 0.2).with_max_tokens(200);

        match self.text_model.complete(request).await {
            Ok(summary) => Summary::Generated(summary.trim().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Summarization failed, falling back to truncation");
                Summary::truncated_from(text, self.config.summary_fallback_chars)
            }
        }
    }

    /// 生成书名
    pub async fn generate_title(
        &self,
        user_prompt: &str,
        context: &EntityContext,
    ) -> Result<String, GenerationError> {
        let request = CompletionRequest::new(
            prompts::book_title(&self.config.theme, user_prompt, context),
            0.8,
        )
        .with_max_tokens(20);

        let raw = self
            .text_model
            .complete(request)
            .await
            .map_err(|e| GenerationError::new("book title", e))?;

        let title = clean_title(&raw);
        tracing::info!(title = %title, "Book title generated");
        Ok(title)
    }

    /// 生成章节标题列表，结果数量总是等于 chapter_count
    pub async fn generate_chapter_titles(
        &self,
        user_prompt: &str,
        context: &EntityContext,
        chapter_count: u32,
    ) -> Result<Vec<String>, GenerationError> {
        let request = CompletionRequest::new(
            prompts::chapter_titles(&self.config.theme, user_prompt, context, chapter_count),
            0.7,
        )
        .with_max_tokens(60 * chapter_count.max(1));

        let content = self
            .text_model
            .complete(request)
            .await
            .map_err(|e| GenerationError::new("chapter titles", e))?;

        Ok(normalize_titles(
            prompts::parse_numbered_list(&content),
            chapter_count as usize,
        ))
    }

    async fn generate_preface(
        &self,
        user_prompt: &str,
        context: &EntityContext,
    ) -> Result<String, GenerationError> {
        if self.config.preface_words == 0 {
            return Ok(STOCK_PREFACE.replace("{theme}", &self.config.theme));
        }
        self.generate_unit(user_prompt, "Preface", context, self.config.preface_words)
            .await
    }

    /// 生成整本书
    ///
    /// 任意正文生成失败都会中止整个流程，不返回半成品
    pub async fn write_book(
        &self,
        user_prompt: &str,
        context: &EntityContext,
        plan: BookPlan,
    ) -> Result<Book, GenerationError> {
        let front_words = self.config.front_matter_words;

        tracing::info!("Generating front matter and chapter outline");
        let (title, preface, prologue, epilogue, chapter_titles) = tokio::try_join!(
            self.generate_title(user_prompt, context),
            self.generate_preface(user_prompt, context),
            self.generate_unit(user_prompt, "Prologue", context, front_words),
            self.generate_unit(user_prompt, "Epilogue", context, front_words),
            self.generate_chapter_titles(user_prompt, context, plan.chapter_count()),
        )?;

        let total = chapter_titles.len();
        let mut chapters = Vec::with_capacity(total);

        tracing::info!(chapters = total, "Starting sequential chapter generation");
        for (index, heading) in chapter_titles.into_iter().enumerate() {
            let number = index + 1;
            let unit_title = format!("Chapter {}: {}", number, heading);

            let content = self
                .generate_unit(
                    user_prompt,
                    &unit_title,
                    context,
                    plan.target_words_per_chapter(),
                )
                .await?;
            let summary = self.summarize(&content).await;
            let image_path = self.illustrator.illustrate(summary.as_str()).await;

            tracing::info!(
                chapter = number,
                heading = %heading,
                summary_degraded = summary.is_degraded(),
                illustrated = image_path.is_some(),
                "Chapter completed"
            );
            chapters.push(Chapter::new(heading, content, image_path));

            if number < total {
                self.pacer.pause(PacePoint::BetweenChapters).await;
            }
        }

        let debug = DebugContext {
            request_line: format!("User Prompt: {}", user_prompt),
            context_json: context.to_pretty_json(),
        };

        Ok(Book::new(title, preface, prologue, epilogue, chapters, debug))
    }
}

/// 截断或补齐章节标题
fn normalize_titles(mut titles: Vec<String>, chapter_count: usize) -> Vec<String> {
    titles.retain(|t| !t.is_empty());
    titles.truncate(chapter_count);
    while titles.len() < chapter_count {
        titles.push(format!("Chapter {}", titles.len() + 1));
    }
    titles
}
