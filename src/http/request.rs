use std::time::Duration;

use reqwest::header::{HeaderMap as Headers, HeaderName, HeaderValue};

use crate::http::types::{Method, Url};
use crate::{Result, RubridgeError};

/// 一个可以执行的请求，由解析后的测试用例构建
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: Headers,
    pub body: Option<String>,
    /// 单个请求的超时（覆盖客户端默认值）
    pub timeout: Option<Duration>,
}

impl Request {
    pub fn new(method: &str, url: &str) -> Result<Self> {
        Ok(Self {
            method: method.parse()?,
            url: Url::parse(url)?,
            headers: Headers::new(),
            body: None,
            timeout: None,
        })
    }

    pub fn insert_header(&mut self, key: &str, value: &str) -> Result<()> {
        let name: HeaderName = key
            .parse()
            .map_err(|_| RubridgeError::ParseError(format!("invalid header name: {}", key)))?;
        let value: HeaderValue = value
            .parse()
            .map_err(|_| RubridgeError::ParseError(format!("invalid header value: {}", value)))?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub fn has_header(&self, key: &str) -> bool {
        self.headers.contains_key(key)
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request() {
        let request = Request::new("POST", "http://example.com/api").unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.host, "example.com");
        assert!(request.body.is_none());
        assert!(request.timeout.is_none());
    }

    #[test]
    fn test_insert_header() {
        let mut request = Request::new("GET", "http://example.com").unwrap();
        request.insert_header("X-Token", "abc").unwrap();
        assert!(request.has_header("x-token"));

        // 非法 header 名必须报错而不是崩溃
        assert!(request.insert_header("Bad Header", "x").is_err());
        assert!(request.insert_header("X-Ok", "bad\nvalue").is_err());
    }

    #[test]
    fn test_builders() {
        let request = Request::new("GET", "http://example.com")
            .unwrap()
            .with_body("hello")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(request.body.as_deref(), Some("hello"));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }
}
