//! 连续性摘要
//!
//! 在同一叙事单元的相邻生成调用之间传递的简短摘要。
//! 摘要失败不会中断流程，而是退化为原文截断，类型上显式区分两种来源。

use std::fmt;

/// 截断兜底后追加的省略标记
pub const TRUNCATION_MARKER: &str = "...";

/// 连续性摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// 模型生成的摘要
    Generated(String),
    /// 摘要调用失败时的截断兜底
    Truncated(String),
}

impl Summary {
    /// 取原文前 max_chars 个字符并追加省略标记
    pub fn truncated_from(text: &str, max_chars: usize) -> Self {
        let mut prefix: String = text.chars().take(max_chars).collect();
        prefix.push_str(TRUNCATION_MARKER);
        Self::Truncated(prefix)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Generated(s) | Self::Truncated(s) => s,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Truncated(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Generated(s) | Self::Truncated(s) => s,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单节单元使用的起始摘要
pub const SINGLE_SECTION_OPENING: &str = "Start of the section.";

/// 多节单元的初始场景设定
pub fn scene_setting(unit_title: &str) -> String {
    format!(
        "The section is '{}'. Set the scene and begin the narrative.",
        unit_title
    )
}
