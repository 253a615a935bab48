pub mod document;
pub mod markdown;
pub mod metadata;
pub mod types;

// Re-export commonly used types
pub use document::DocumentParser;
pub use markdown::MarkdownParser;
pub use types::{CaseMetadata, ParseError, ParseResult, ParsedCase, ParsedDocument};

/// 根据扩展名选择解析器并解析测试文档
///
/// `.md` / `.markdown` 走 Markdown 解析器，其余按普通测试文档处理。
pub fn parse_path<P: AsRef<std::path::Path>>(path: P) -> ParseResult<ParsedDocument> {
    let path = path.as_ref();

    let is_markdown = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            ext == "md" || ext == "markdown"
        })
        .unwrap_or(false);

    if is_markdown {
        MarkdownParser::parse_file(path)
    } else {
        DocumentParser::parse_file(path)
    }
}

/// 从字符串内容解析测试文档
pub fn parse_content(content: &str) -> ParseResult<ParsedDocument> {
    DocumentParser::parse_content(content)
}
