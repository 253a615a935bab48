use crate::parser::document::DocumentParser;
use crate::parser::types::{ParseResult, ParsedDocument};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use std::path::Path;

/// Markdown 测试文档解析器
///
/// 从 Markdown 中提取 ```http / ```rest 代码块，每个代码块按普通
/// 测试文档解析。代码块前最近的标题作为用例的默认名称。
pub struct MarkdownParser;

impl MarkdownParser {
    /// 从文件路径解析
    pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedDocument> {
        let content = std::fs::read_to_string(&path)?;
        let mut parsed = Self::parse_content(&content)?;
        parsed.source_path = Some(path.as_ref().to_path_buf());
        Ok(parsed)
    }

    /// 从字符串内容解析
    pub fn parse_content(content: &str) -> ParseResult<ParsedDocument> {
        let mut document = ParsedDocument::new();

        for block in Self::extract_fenced_blocks(content) {
            let mut inner = DocumentParser::parse_content(&block.content)?;

            // 没有显式 @name 的用例继承最近的标题
            for case in &mut inner.cases {
                if case.metadata.name.is_none() {
                    case.metadata.name = block.heading.clone();
                }
            }

            document.cases.extend(inner.cases);
        }

        Ok(document)
    }

    /// 提取所有 http/rest 代码块（使用 pulldown-cmark）
    fn extract_fenced_blocks(content: &str) -> Vec<FencedBlock> {
        let parser = Parser::new(content);

        let mut blocks = Vec::new();
        let mut last_heading: Option<String> = None;
        let mut heading_buf = String::new();
        let mut in_heading = false;
        let mut code_buf = String::new();
        let mut in_http_block = false;

        for event in parser {
            match event {
                Event::Start(Tag::Heading { .. }) => {
                    in_heading = true;
                    heading_buf.clear();
                }

                Event::End(TagEnd::Heading(..)) => {
                    if in_heading && !heading_buf.is_empty() {
                        last_heading = Some(heading_buf.clone());
                    }
                    in_heading = false;
                }

                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                    let lang = lang.to_string().to_lowercase();
                    if lang == "http" || lang == "rest" {
                        in_http_block = true;
                        code_buf.clear();
                    }
                }

                Event::End(TagEnd::CodeBlock) => {
                    if in_http_block {
                        blocks.push(FencedBlock {
                            content: code_buf.clone(),
                            heading: last_heading.clone(),
                        });
                        in_http_block = false;
                        code_buf.clear();
                    }
                }

                Event::Text(text) => {
                    if in_heading {
                        heading_buf.push_str(&text);
                    } else if in_http_block {
                        code_buf.push_str(&text);
                    }
                }

                _ => {}
            }
        }

        blocks
    }
}

#[derive(Debug)]
struct FencedBlock {
    content: String,
    heading: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_http_block() {
        let content = r#"
# API Docs

## Get Users

```http
GET https://api.example.com/users
```
"#;
        let parsed = MarkdownParser::parse_content(content).unwrap();
        assert_eq!(parsed.cases.len(), 1);
        assert_eq!(parsed.cases[0].metadata.name, Some("Get Users".to_string()));
    }

    #[test]
    fn test_extract_multiple_blocks() {
        let content = r#"
# User API

## List Users

```http
GET https://api.example.com/users
```

## Create User

```rest
POST https://api.example.com/users
Content-Type: application/json

{"name": "Alice"}
```
"#;
        let parsed = MarkdownParser::parse_content(content).unwrap();
        assert_eq!(parsed.cases.len(), 2);
        assert_eq!(
            parsed.cases[0].metadata.name,
            Some("List Users".to_string())
        );
        assert_eq!(
            parsed.cases[1].metadata.name,
            Some("Create User".to_string())
        );
        assert_eq!(parsed.cases[1].body, Some(r#"{"name": "Alice"}"#.to_string()));
    }

    #[test]
    fn test_explicit_name_overrides_heading() {
        let content = r#"
## Get Users

```http
@name custom-name
GET https://api.example.com/users
```
"#;
        let parsed = MarkdownParser::parse_content(content).unwrap();
        assert_eq!(
            parsed.cases[0].metadata.name,
            Some("custom-name".to_string())
        );
    }

    #[test]
    fn test_status_metadata_survives_extraction() {
        let content = r#"
## Delete User

```http
@status 204
DELETE https://api.example.com/users/1
```
"#;
        let parsed = MarkdownParser::parse_content(content).unwrap();
        assert_eq!(parsed.cases[0].metadata.expected_status, Some(204));
    }

    #[test]
    fn test_empty_file() {
        let parsed = MarkdownParser::parse_content("").unwrap();
        assert_eq!(parsed.cases.len(), 0);
    }

    #[test]
    fn test_no_code_blocks() {
        let content = r#"
# API Documentation

This is just text without any code blocks.

## Overview

More text here.
"#;
        let parsed = MarkdownParser::parse_content(content).unwrap();
        assert_eq!(parsed.cases.len(), 0);
    }

    #[test]
    fn test_other_languages_ignored() {
        let content = r#"
## Setup

```bash
curl http://example.com
```

```http
GET http://example.com/ping
```
"#;
        let parsed = MarkdownParser::parse_content(content).unwrap();
        assert_eq!(parsed.cases.len(), 1);
        assert_eq!(parsed.cases[0].url, "http://example.com/ping");
    }
}
