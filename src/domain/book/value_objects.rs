//! Book Context - Value Objects

/// 文件名中不允许出现的字符
const UNSAFE_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// 文件名最大字符数
const MAX_FILENAME_CHARS: usize = 50;

/// 清理模型返回的标题：去掉 `#`、首尾空白和引号
pub fn clean_title(raw: &str) -> String {
    raw.replace('#', "")
        .trim()
        .trim_matches('"')
        .trim()
        .to_string()
}

/// 由书名生成文件名主干
///
/// 去掉文件系统不安全字符，截断到 50 个字符，空格替换为下划线
pub fn title_slug(title: &str) -> String {
    let stripped: String = title
        .chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c))
        .take(MAX_FILENAME_CHARS)
        .collect();
    stripped.trim().replace(' ', "_")
}

/// 生成 PDF 文件名，书名无可用字符时使用 `book`
pub fn book_file_name(title: &str) -> String {
    let slug = title_slug(title);
    if slug.is_empty() {
        "book.pdf".to_string()
    } else {
        format!("{}.pdf", slug)
    }
}
