use crate::http::Response;
use std::fmt;
use std::time::Duration;

/// 用例的终态
///
/// 只有 Passed 和 Pending 被视为可接受的结果，其余状态都会
/// 被上报为问题。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    /// 请求完成且满足期望
    Passed,
    /// 请求完成但不满足期望
    Failed,
    /// 用例被标记为跳过，未执行
    Pending,
    /// 请求无法构建或传输失败
    Errored,
}

impl CaseState {
    /// 该状态是否算作可接受的结果
    pub fn is_accepted(&self) -> bool {
        matches!(self, CaseState::Passed | CaseState::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseState::Passed => "passed",
            CaseState::Failed => "failed",
            CaseState::Pending => "pending",
            CaseState::Errored => "errored",
        }
    }
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 单个用例的执行结果
#[derive(Debug, Clone)]
pub struct CaseResult {
    /// 用例序号（从 1 开始）
    pub case_number: usize,

    /// 用例名称（来自 @name 或 Markdown 标题）
    pub name: Option<String>,

    /// HTTP 方法
    pub method: String,

    /// 请求 URL（变量替换后）
    pub url: String,

    /// 终态
    pub state: CaseState,

    /// 响应状态码（如果收到响应）
    pub status: Option<u16>,

    /// 执行耗时
    pub duration: Duration,

    /// 失败或出错原因
    pub error: Option<String>,
}

impl CaseResult {
    pub fn passed(
        case_number: usize,
        name: Option<String>,
        method: String,
        url: String,
        response: &Response,
    ) -> Self {
        Self {
            case_number,
            name,
            method,
            url,
            state: CaseState::Passed,
            status: Some(response.status.code()),
            duration: response.duration,
            error: None,
        }
    }

    pub fn failed(
        case_number: usize,
        name: Option<String>,
        method: String,
        url: String,
        response: &Response,
        reason: String,
    ) -> Self {
        Self {
            case_number,
            name,
            method,
            url,
            state: CaseState::Failed,
            status: Some(response.status.code()),
            duration: response.duration,
            error: Some(reason),
        }
    }

    pub fn pending(case_number: usize, name: Option<String>, method: String, url: String) -> Self {
        Self {
            case_number,
            name,
            method,
            url,
            state: CaseState::Pending,
            status: None,
            duration: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn errored(
        case_number: usize,
        name: Option<String>,
        method: String,
        url: String,
        error: String,
        duration: Duration,
    ) -> Self {
        Self {
            case_number,
            name,
            method,
            url,
            state: CaseState::Errored,
            status: None,
            duration,
            error: Some(error),
        }
    }

    /// 用例标题：优先用名称，否则用 "方法 URL"
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", self.method, self.url),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.state.is_accepted()
    }
}

/// 单个文件的执行摘要
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
    pub errored: usize,
    pub total_duration: Duration,
}

impl RunSummary {
    pub fn from_results(results: &[CaseResult]) -> Self {
        let count = |state: CaseState| results.iter().filter(|r| r.state == state).count();

        Self {
            total: results.len(),
            passed: count(CaseState::Passed),
            failed: count(CaseState::Failed),
            pending: count(CaseState::Pending),
            errored: count(CaseState::Errored),
            total_duration: results.iter().map(|r| r.duration).sum(),
        }
    }

    /// 所有用例都处于可接受状态
    pub fn all_accepted(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}
