use crate::http::Method;
use crate::parser::metadata;
use crate::parser::types::{ParseError, ParseResult, ParsedCase, ParsedDocument};
use std::path::Path;

/// 测试文档解析器
pub struct DocumentParser;

impl DocumentParser {
    /// 从文件路径解析
    pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedDocument> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut parsed = Self::parse_content(&content)?;
        parsed.source_path = Some(path.as_ref().to_path_buf());
        Ok(parsed)
    }

    /// 从字符串内容解析
    ///
    /// 没有任何用例的文档是合法的，返回空结果。
    pub fn parse_content(content: &str) -> ParseResult<ParsedDocument> {
        let mut document = ParsedDocument::new();

        // 按 ### 分割用例块
        let blocks = Self::split_by_separator(content);

        for (block, start_line) in blocks {
            if let Some(case) = Self::parse_case_block(&block, start_line)? {
                document.add_case(case);
            }
        }

        Ok(document)
    }

    /// 按 ### 分隔符分割内容
    fn split_by_separator(content: &str) -> Vec<(String, usize)> {
        let mut blocks = Vec::new();
        let mut current_block = String::new();
        let mut block_start_line = 1;
        let mut current_line = 1;

        for line in content.lines() {
            if line.trim().starts_with("###") {
                // 遇到分隔符，保存当前块
                if !current_block.trim().is_empty() {
                    blocks.push((current_block.clone(), block_start_line));
                }
                current_block.clear();
                block_start_line = current_line + 1;
            } else {
                current_block.push_str(line);
                current_block.push('\n');
            }
            current_line += 1;
        }

        // 添加最后一个块
        if !current_block.trim().is_empty() {
            blocks.push((current_block, block_start_line));
        }

        blocks
    }

    /// 解析单个用例块
    fn parse_case_block(block: &str, start_line: usize) -> ParseResult<Option<ParsedCase>> {
        let lines: Vec<&str> = block.lines().collect();

        if lines.is_empty() {
            return Ok(None);
        }

        let mut case = ParsedCase::new(start_line);
        let mut line_index = 0;
        let mut current_line = start_line;

        // 解析元数据和跳过空行/注释
        while line_index < lines.len() {
            let line = lines[line_index].trim();

            if line.is_empty() || Self::is_comment(line) {
                line_index += 1;
                current_line += 1;
                continue;
            }

            // 解析元数据
            if line.starts_with('@') {
                if let Some(metadata) = metadata::parse_metadata(line)? {
                    metadata::apply_metadata(&metadata, &mut case.metadata);
                }
                line_index += 1;
                current_line += 1;
                continue;
            }

            // 遇到非元数据行，结束元数据解析
            break;
        }

        if line_index >= lines.len() {
            return Ok(None); // 只有元数据，没有请求
        }

        // 解析请求行（方法 + URL）
        let request_line = lines[line_index].trim();
        Self::parse_request_line(request_line, current_line, &mut case)?;
        line_index += 1;

        // 解析 Headers
        while line_index < lines.len() {
            let line = lines[line_index].trim();

            // 空行表示 headers 结束，body 开始
            if line.is_empty() {
                line_index += 1;
                break;
            }

            // 跳过注释
            if Self::is_comment(line) {
                line_index += 1;
                continue;
            }

            // 解析 header
            if let Some((key, value)) = Self::parse_header(line) {
                case.headers.push((key.to_string(), value.to_string()));
            }

            line_index += 1;
        }

        // 解析 Body（空行后的内容）
        if line_index < lines.len() {
            let body = lines[line_index..].join("\n");
            let body = body.trim();
            if !body.is_empty() {
                case.body = Some(body.to_string());
            }
        }

        // 验证 URL
        if case.url.is_empty() {
            return Err(ParseError::MissingUrl { line: start_line });
        }

        Ok(Some(case))
    }

    /// 解析请求行（方法 + URL）
    fn parse_request_line(
        line: &str,
        line_number: usize,
        case: &mut ParsedCase,
    ) -> ParseResult<()> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.len() {
            0 => {
                return Err(ParseError::InvalidFormat {
                    line: line_number,
                    message: "Empty request line".to_string(),
                });
            }
            1 => {
                // 只有 URL，方法默认为 GET
                case.url = parts[0].to_string();
                case.method = None;
            }
            2 => {
                // 方法 + URL
                let method = parts[0].to_uppercase();
                if Method::parse(&method).is_err() {
                    return Err(ParseError::InvalidMethod {
                        method,
                        line: line_number,
                    });
                }
                case.method = Some(method);
                case.url = parts[1].to_string();
            }
            _ => {
                return Err(ParseError::InvalidFormat {
                    line: line_number,
                    message: "Too many parts in request line".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 解析 header 行
    fn parse_header(line: &str) -> Option<(&str, &str)> {
        if let Some(colon_pos) = line.find(':') {
            let key = line[..colon_pos].trim();
            let value = line[colon_pos + 1..].trim();
            if !key.is_empty() {
                return Some((key, value));
            }
        }
        None
    }

    /// 判断是否为注释行
    fn is_comment(line: &str) -> bool {
        line.starts_with('#') || line.starts_with("//")
    }
}
