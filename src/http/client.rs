use std::time::{Duration, Instant};

use crate::Result;
use crate::http::request::Request;
use crate::http::response::Response;

/// reqwest 客户端的薄封装
///
/// 连接池随 Client 克隆共享，一个池用一个客户端就够了。
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    /// 客户端级默认超时；单个请求可以用 Request::timeout 覆盖
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::builder()
                .timeout(Self::DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    pub async fn execute(&self, request: Request) -> Result<Response> {
        let mut builder = self
            .inner
            .request(request.method.into(), request.url.to_string())
            .headers(request.headers);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        let raw = builder.send().await?;
        let elapsed = started.elapsed();

        let status = raw.status().as_u16();
        let headers = raw.headers().clone();
        let body = raw.text().await?;

        Response::new(status, headers, body, elapsed)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
