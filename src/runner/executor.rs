use crate::Result;
use crate::http::{Client, Request, Response};
use crate::parser::{ParsedCase, ParsedDocument};
use crate::runner::types::CaseResult;
use crate::variable::{VariableContext, VariableResolver};
use std::time::Instant;

/// 用例执行器
///
/// 持有 HTTP 客户端和变量上下文，把解析后的用例变成带终态的结果。
pub struct CaseExecutor {
    client: Client,
    variables: VariableContext,
}

impl CaseExecutor {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            variables: VariableContext::new(),
        }
    }

    pub fn with_variables(client: Client, variables: VariableContext) -> Self {
        Self { client, variables }
    }

    /// 批量执行一个文档中的所有用例
    pub async fn execute_all(&self, document: ParsedDocument) -> Vec<CaseResult> {
        let mut results = Vec::new();

        for (index, case) in document.cases.iter().enumerate() {
            results.push(self.execute(case, index + 1).await);
        }

        results
    }

    /// 执行单个用例并判定终态
    pub async fn execute(&self, case: &ParsedCase, case_number: usize) -> CaseResult {
        let method = case.method_or_default().to_string();
        let url = VariableResolver::resolve(&case.url, &self.variables);
        let name = case.name().map(|s| s.to_string());

        // 标记为跳过的用例不执行
        if case.should_skip() {
            return CaseResult::pending(case_number, name, method, url);
        }

        // 开始计时
        let start = Instant::now();

        let request = match self.build_request(case, &method, &url) {
            Ok(req) => req,
            Err(e) => {
                return CaseResult::errored(
                    case_number,
                    name,
                    method,
                    url,
                    format!("Failed to build request: {}", e),
                    start.elapsed(),
                );
            }
        };

        match self.client.execute(request).await {
            Ok(response) => Self::classify(
                case_number,
                name,
                method,
                url,
                &response,
                case.metadata.expected_status,
            ),
            Err(e) => CaseResult::errored(
                case_number,
                name,
                method,
                url,
                format!("Request failed: {}", e),
                start.elapsed(),
            ),
        }
    }

    /// 把解析后的用例转换为可执行的请求
    fn build_request(&self, case: &ParsedCase, method: &str, url: &str) -> Result<Request> {
        let mut request = Request::new(method, url)?;

        for (key, value) in &case.headers {
            let value = VariableResolver::resolve(value, &self.variables);
            request.insert_header(key, &value)?;
        }

        if let Some(body) = &case.body {
            let body = VariableResolver::resolve(body, &self.variables);

            // 未显式指定 Content-Type 时推断 JSON
            if !request.has_header("content-type") && is_json_like(&body) {
                request.insert_header("Content-Type", "application/json")?;
            }

            request = request.with_body(&body);
        }

        if let Some(timeout) = case.metadata.timeout {
            request = request.with_timeout(timeout);
        }

        Ok(request)
    }

    /// 根据响应和期望状态码判定终态
    fn classify(
        case_number: usize,
        name: Option<String>,
        method: String,
        url: String,
        response: &Response,
        expected_status: Option<u16>,
    ) -> CaseResult {
        match expected_status {
            Some(expected) if response.status.code() == expected => {
                CaseResult::passed(case_number, name, method, url, response)
            }
            Some(expected) => CaseResult::failed(
                case_number,
                name,
                method,
                url,
                response,
                format!("expected status {}, got {}", expected, response.status),
            ),
            None if response.is_success() => {
                CaseResult::passed(case_number, name, method, url, response)
            }
            None => CaseResult::failed(
                case_number,
                name,
                method,
                url,
                response,
                format!("expected success status, got {}", response.status),
            ),
        }
    }
}

impl Default for CaseExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// 简单的 JSON 格式检测
fn is_json_like(s: &str) -> bool {
    let trimmed = s.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::types::CaseState;
    use std::time::Duration;

    fn case_with_url(url: &str) -> ParsedCase {
        let mut case = ParsedCase::new(1);
        case.url = url.to_string();
        case
    }

    #[tokio::test]
    async fn test_skip_becomes_pending() {
        let mut case = case_with_url("http://example.com");
        case.metadata.skip = true;
        case.metadata.name = Some("not yet".to_string());

        let executor = CaseExecutor::new();
        let result = executor.execute(&case, 1).await;

        assert_eq!(result.state, CaseState::Pending);
        assert_eq!(result.title(), "not yet");
        assert_eq!(result.status, None);
    }

    #[tokio::test]
    async fn test_unparseable_url_is_errored() {
        let case = case_with_url("ftp://example.com/file");

        let executor = CaseExecutor::new();
        let result = executor.execute(&case, 1).await;

        assert_eq!(result.state, CaseState::Errored);
        assert!(result.error.as_deref().unwrap().contains("Failed to build request"));
    }

    #[tokio::test]
    async fn test_invalid_header_is_errored() {
        let mut case = case_with_url("http://example.com");
        case.headers
            .push(("Bad Header".to_string(), "x".to_string()));

        let executor = CaseExecutor::new();
        let result = executor.execute(&case, 1).await;

        assert_eq!(result.state, CaseState::Errored);
    }

    #[test]
    fn test_build_request_resolves_variables() {
        let mut variables = VariableContext::new();
        variables.insert("token", "secret");

        let mut case = case_with_url("http://example.com");
        case.headers
            .push(("Authorization".to_string(), "Bearer {{token}}".to_string()));
        case.body = Some(r#"{"token": "{{token}}"}"#.to_string());

        let executor = CaseExecutor::with_variables(Client::new(), variables);
        let request = executor
            .build_request(&case, "POST", "http://example.com")
            .unwrap();

        assert_eq!(
            request.headers.get("authorization").unwrap(),
            "Bearer secret"
        );
        assert_eq!(request.body.as_deref(), Some(r#"{"token": "secret"}"#));
        // body 看起来像 JSON，应自动加上 Content-Type
        assert!(request.has_header("content-type"));
    }

    #[test]
    fn test_build_request_keeps_explicit_content_type() {
        let mut case = case_with_url("http://example.com");
        case.headers
            .push(("Content-Type".to_string(), "text/plain".to_string()));
        case.body = Some(r#"{"still": "text"}"#.to_string());

        let executor = CaseExecutor::new();
        let request = executor
            .build_request(&case, "POST", "http://example.com")
            .unwrap();

        assert_eq!(request.headers.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn test_build_request_applies_timeout() {
        let mut case = case_with_url("http://example.com");
        case.metadata.timeout = Some(Duration::from_secs(5));

        let executor = CaseExecutor::new();
        let request = executor
            .build_request(&case, "GET", "http://example.com")
            .unwrap();

        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_is_json_like() {
        assert!(is_json_like(r#"{"key": "value"}"#));
        assert!(is_json_like(r#"  {"key": "value"}  "#)); // 带空格
        assert!(is_json_like(r#"[1, 2, 3]"#));
        assert!(!is_json_like("plain text"));
        assert!(!is_json_like("key=value"));
    }
}
