//! 提示词模板
//!
//! 纯文本格式化，不包含任何调用逻辑

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::dataset::{EntityContext, ReferenceDataset};

/// 实体选择提示词：紧凑名称索引 + 用户故事提示
pub fn data_selection(theme: &str, user_prompt: &str, dataset: &ReferenceDataset) -> String {
    let index = serde_json::to_string_pretty(&dataset.name_index()).unwrap_or_default();
    format!(
        r#"Based on the user's story prompt, select a small, coherent set of entities from the provided {theme} reference data. This will be the cast for the entire novel. Choose a few main characters, a primary setting (planet), and a few relevant starships.
USER PROMPT: "{user_prompt}"
AVAILABLE DATA:
{index}
Respond with a JSON object containing the *names* of the entities to use, with the keys "people", "planets" and "starships".
Example Response:
{{
  "people": ["Luke Skywalker", "Leia Organa"],
  "planets": ["Tatooine"],
  "starships": ["X-wing"]
}}
"#
    )
}

/// "故事将包含…" 上下文描述
fn featuring(context: &EntityContext) -> String {
    let people = context.names("people");
    let planets = context.names("planets");
    if people.is_empty() && planets.is_empty() {
        return String::new();
    }
    format!(
        "The story will feature: {} on the planet {}.",
        people.join(", "),
        planets.join(", ")
    )
}

/// 书名提示词
pub fn book_title(theme: &str, user_prompt: &str, context: &EntityContext) -> String {
    format!(
        r#"Generate a short, creative, and evocative book title for a {theme} story about: '{user_prompt}'.
{featuring}
The title should sound like a real novel. Do not include '{theme}:' in the title itself. Only return the title, with no extra text or quotation marks.
"#,
        featuring = featuring(context)
    )
}

/// 章节标题列表提示词
pub fn chapter_titles(
    theme: &str,
    user_prompt: &str,
    context: &EntityContext,
    chapter_count: u32,
) -> String {
    format!(
        r#"I am writing a {chapter_count}-chapter {theme} fan novel about: '{user_prompt}'.
{featuring}
Please generate a list of {chapter_count} creative and sequential chapter titles for this story. Return them as a numbered list (e.g., '1. The Awakening', '2. A Fading Hope').
"#,
        featuring = featuring(context)
    )
}

/// 单节正文提示词
pub fn section(
    theme: &str,
    user_prompt: &str,
    unit_title: &str,
    summary: &str,
    context: &EntityContext,
    word_target: u32,
) -> String {
    let context_json = context.to_pretty_json();
    format!(
        r#"You are a novelist writing a {theme} story in the second person ("You feel...", "You see...").
Your task is to write a single, detailed section of the novel.

CRITICAL INSTRUCTION: base your writing exclusively on the data provided in the DATA CONTEXT section. Do not invent new characters, planets, or major technologies. Weave the provided data into a narrative.

STORY THEME: "{user_prompt}"
CURRENT SECTION: This section is part of '{unit_title}'.
CONTINUITY: The previous part of the story concluded with the following events: "{summary}"

DATA CONTEXT (your only source of truth for names, places, and specs):
---
{context_json}
---

Write the next section of the story, continuing from the summary. Make it detailed, descriptive, and approximately {word_target} words long.
Begin writing the content directly. Do not repeat the chapter title.
"#
    )
}

/// 连续性摘要提示词
pub fn summarization(section_text: &str) -> String {
    format!(
        r#"Summarize the following block of text in 2-3 sentences. Focus on the key actions, character movements, and plot developments. This summary will be used as a continuity guide for the next block of writing.

TEXT TO SUMMARIZE:
---
{section_text}
---
"#
    )
}

/// 插图安全提示词：把章节摘要改写为不含专有名词的画面描述
pub fn safe_image_prompt(theme: &str, chapter_summary: &str) -> String {
    format!(
        r#"Based on the following chapter summary, write a single, descriptive paragraph to be used as a prompt for an AI image generator.
CRITICAL INSTRUCTIONS:
- The prompt MUST be safe and adhere to content policies.
- Do NOT use specific, named characters. Describe their roles instead (e.g. "a veteran pilot in a scuffed flight suit", "a noble knight in hooded robes").
- Do NOT describe graphic violence or gore.
- Focus on a cinematic, atmospheric, visually rich scene in the style of classic {theme} concept art.
Chapter Summary: "{chapter_summary}"
Create a single-paragraph prompt in the style of "A dramatic digital painting..." that is safe for all audiences. Return only the paragraph.
"#
    )
}

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\.\s*(.*)$").expect("valid numbered list pattern"));

/// 解析编号列表（"1. 标题"），忽略其他行
pub fn parse_numbered_list(content: &str) -> Vec<String> {
    NUMBERED_LINE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// 类别 -> 名称列表的提示词调试展示
pub fn describe_selection(selection: &BTreeMap<String, Vec<String>>) -> String {
    selection
        .iter()
        .map(|(category, names)| format!("{}: {}", category, names.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
