use std::path::PathBuf;
use std::time::Duration;

/// 单个解析后的测试用例
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCase {
    /// HTTP 方法，如果缺失则默认为 GET
    pub method: Option<String>,

    /// 请求 URL（必需）
    pub url: String,

    /// Headers 列表，保持原始顺序
    pub headers: Vec<(String, String)>,

    /// 请求体（可选）
    pub body: Option<String>,

    /// 用例元数据
    pub metadata: CaseMetadata,

    /// 用例在文件中的起始行号（用于错误报告）
    pub line_number: usize,
}

impl ParsedCase {
    /// 创建一个新的空用例
    pub fn new(line_number: usize) -> Self {
        Self {
            method: None,
            url: String::new(),
            headers: Vec::new(),
            body: None,
            metadata: CaseMetadata::default(),
            line_number,
        }
    }

    /// 获取 HTTP 方法，如果未指定则返回 "GET"
    pub fn method_or_default(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }

    /// 检查用例是否应该被跳过
    pub fn should_skip(&self) -> bool {
        self.metadata.skip
    }

    /// 获取用例名称（如果有）
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }
}

/// 用例元数据
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseMetadata {
    /// 用例名称（@name）
    pub name: Option<String>,

    /// 是否跳过该用例（@skip）
    pub skip: bool,

    /// 请求超时时间（@timeout，可选）
    pub timeout: Option<Duration>,

    /// 期望的响应状态码（@status，可选）
    pub expected_status: Option<u16>,
}

/// 单条元数据指令
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    Name(String),
    Skip(bool),
    Timeout(Duration),
    ExpectedStatus(u16),
}

/// 整个文档的解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// 解析出的所有用例
    pub cases: Vec<ParsedCase>,

    /// 源文件路径（用于错误报告）
    pub source_path: Option<PathBuf>,
}

impl ParsedDocument {
    /// 创建一个新的空文档解析结果
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            source_path: None,
        }
    }

    /// 设置源文件路径
    pub fn with_source_path(mut self, path: PathBuf) -> Self {
        self.source_path = Some(path);
        self
    }

    /// 添加一个用例
    pub fn add_case(&mut self, case: ParsedCase) {
        self.cases.push(case);
    }

    /// 获取所有未标记为跳过的用例
    pub fn active_cases(&self) -> impl Iterator<Item = &ParsedCase> {
        self.cases.iter().filter(|c| !c.should_skip())
    }
}

impl Default for ParsedDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析错误类型
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 文件格式错误
    #[error("Invalid format at line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    /// 缺少必需的 URL
    #[error("Missing URL at line {line}")]
    MissingUrl { line: usize },

    /// 无效的元数据
    #[error("Invalid metadata at line {line}: {message}")]
    InvalidMetadata { line: usize, message: String },

    /// 无效的 HTTP 方法
    #[error("Invalid HTTP method '{method}' at line {line}")]
    InvalidMethod { method: String, line: usize },

    /// 无效的 Header 格式
    #[error("Invalid header format at line {line}: expected 'Key: Value'")]
    InvalidHeader { line: usize },

    /// 无效的期望状态码
    #[error("Invalid expected status code {status}: must be 100-599")]
    InvalidStatus { status: u16 },

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 解析结果类型别名
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_case_new() {
        let case = ParsedCase::new(1);
        assert_eq!(case.line_number, 1);
        assert_eq!(case.method, None);
        assert_eq!(case.url, "");
        assert_eq!(case.headers.len(), 0);
        assert_eq!(case.body, None);
        assert!(!case.should_skip());
    }

    #[test]
    fn test_method_or_default() {
        let mut case = ParsedCase::new(1);
        assert_eq!(case.method_or_default(), "GET");

        case.method = Some("POST".to_string());
        assert_eq!(case.method_or_default(), "POST");
    }

    #[test]
    fn test_parsed_document_new() {
        let doc = ParsedDocument::new();
        assert_eq!(doc.cases.len(), 0);
        assert_eq!(doc.source_path, None);
    }

    #[test]
    fn test_parsed_document_with_source_path() {
        let doc = ParsedDocument::new().with_source_path(PathBuf::from("/test/file.http"));
        assert_eq!(doc.source_path, Some(PathBuf::from("/test/file.http")));
    }

    #[test]
    fn test_active_cases() {
        let mut doc = ParsedDocument::new();

        let mut case1 = ParsedCase::new(1);
        case1.url = "http://example.com".to_string();

        let mut case2 = ParsedCase::new(5);
        case2.url = "http://example.org".to_string();
        case2.metadata.skip = true;

        doc.add_case(case1);
        doc.add_case(case2);

        let active: Vec<_> = doc.active_cases().collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].url, "http://example.com");
    }
}
