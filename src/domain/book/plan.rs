//! 篇幅规划器
//!
//! 把请求的页数换算成章节数和每章目标字数（纯函数，无 I/O）

use serde::Serialize;

/// 每页字数
pub const WORDS_PER_PAGE: u32 = 250;

/// 固定页数：调试页、标题页、日期页、目录、序言、楔子、尾声以及空白分隔页
pub const FIXED_OVERHEAD_PAGES: i64 = 27;

/// 每章正文页数
pub const CONTENT_PAGES_PER_CHAPTER: i64 = 5;

/// 每章额外页数（章节标题页 + 插图页）
pub const PER_CHAPTER_OVERHEAD_PAGES: i64 = 2;

/// 章节数上限
pub const MAX_CHAPTERS: u32 = 12;

/// 篇幅规划结果
///
/// 不变量: 1 <= chapter_count <= MAX_CHAPTERS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookPlan {
    chapter_count: u32,
    target_words_per_chapter: u32,
}

impl BookPlan {
    pub fn chapter_count(&self) -> u32 {
        self.chapter_count
    }

    pub fn target_words_per_chapter(&self) -> u32 {
        self.target_words_per_chapter
    }
}

/// 根据请求页数计算章节数与每章字数
///
/// 取整采用 round-half-to-even，与线上行为保持一致
pub fn plan(requested_pages: u32) -> BookPlan {
    let requested = i64::from(requested_pages);
    let pages_for_chapters = requested - FIXED_OVERHEAD_PAGES;
    let per_chapter = CONTENT_PAGES_PER_CHAPTER + PER_CHAPTER_OVERHEAD_PAGES;

    let raw = (pages_for_chapters as f64 / per_chapter as f64).round_ties_even() as i64;
    let chapter_count = raw.clamp(1, i64::from(MAX_CHAPTERS));

    let content_pages = (requested
        - FIXED_OVERHEAD_PAGES
        - chapter_count * PER_CHAPTER_OVERHEAD_PAGES)
        .max(1);
    let target_words = content_pages * i64::from(WORDS_PER_PAGE) / chapter_count;

    BookPlan {
        chapter_count: chapter_count as u32, // 已限定在 1..=12
        // 超大请求饱和到 u32::MAX，不回绕
        target_words_per_chapter: u32::try_from(target_words).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extreme_request_saturates_word_target() {
        let plan = plan(u32::MAX);
        assert_eq!(plan.chapter_count(), 12);
        assert_eq!(plan.target_words_per_chapter(), u32::MAX);

        // 仍可表示的最大值附近保持精确
        let plan = super::plan(100_000_000);
        assert_eq!(plan.target_words_per_chapter(), 2_083_332_270);
    }

    #[test]
    fn test_overhead_only_request_yields_single_short_chapter() {
        let plan = plan(27);
        assert_eq!(plan.chapter_count(), 1);
        assert_eq!(plan.target_words_per_chapter(), 250);
    }

    #[test]
    fn test_default_request() {
        // (100 - 27) / 7 = 10.43 -> 10 章; (100 - 27 - 20) * 250 / 10 = 1325
        let plan = plan(100);
        assert_eq!(plan.chapter_count(), 10);
        assert_eq!(plan.target_words_per_chapter(), 1325);
    }

    #[test]
    fn test_tiny_request_clamps_to_one_chapter() {
        let plan = plan(0);
        assert_eq!(plan.chapter_count(), 1);
        assert_eq!(plan.target_words_per_chapter(), 250);
    }

    #[test]
    fn test_huge_request_caps_chapters() {
        let plan = plan(1000);
        assert_eq!(plan.chapter_count(), MAX_CHAPTERS);
        // (1000 - 27 - 24) * 250 / 12 = 19770
        assert_eq!(plan.target_words_per_chapter(), 19770);
    }

    #[test]
    fn test_rounds_to_nearest_chapter() {
        // (44 - 27) / 7 = 2.43 -> 2; (48 - 27) / 7 = 3.0 -> 3; (52 - 27) / 7 = 3.57 -> 4
        assert_eq!(plan(44).chapter_count(), 2);
        assert_eq!(plan(48).chapter_count(), 3);
        assert_eq!(plan(52).chapter_count(), 4);
    }

    #[test]
    fn test_bounds_hold_across_range() {
        for pages in 0..=500 {
            let plan = plan(pages);
            assert!(
                (1..=MAX_CHAPTERS).contains(&plan.chapter_count()),
                "pages={pages} chapters={}",
                plan.chapter_count()
            );
        }
    }

    #[test]
    fn test_chapter_count_is_monotonic() {
        let mut previous = 0;
        for pages in 0..=500 {
            let count = plan(pages).chapter_count();
            assert!(count >= previous, "pages={pages}: {count} < {previous}");
            previous = count;
        }
    }
}
