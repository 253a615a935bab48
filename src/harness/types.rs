use serde::{Deserialize, Serialize};

use crate::runner::{CaseResult, CaseState};

/// 所有问题统一使用的严重级别
pub const PROBLEM_SEVERITY: u32 = 1;

/// 运行器上报给收集器的单个用例结局
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    /// 用例标题
    pub title: String,

    /// 终态
    pub state: CaseState,

    /// 所属测试文件路径
    pub source: String,
}

impl CaseOutcome {
    pub fn new(title: String, state: CaseState, source: String) -> Self {
        Self {
            title,
            state,
            source,
        }
    }

    pub fn from_result(result: &CaseResult, source: &str) -> Self {
        Self {
            title: result.title(),
            state: result.state,
            source: source.to_string(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.state.is_accepted()
    }
}

/// 报告中的一条问题记录
///
/// 字段名与宿主约定的 JSON 形状一致，`lineContent` 保持驼峰命名。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub message: String,
    pub severity: u32,
    #[serde(rename = "lineContent")]
    pub line_content: String,
    pub source: String,
}

impl Problem {
    /// 由不可接受的用例结局构造问题记录
    pub fn from_outcome(outcome: &CaseOutcome) -> Self {
        Self {
            message: format!("{} [{}]", outcome.title, outcome.state),
            severity: PROBLEM_SEVERITY,
            line_content: String::new(),
            source: outcome.source.clone(),
        }
    }
}

/// 最终聚合报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// 保留字段，当前约定下始终为空数组
    pub results: Vec<serde_json::Value>,
    pub problems: Vec<Problem>,
}

impl AggregateReport {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self {
            results: Vec::new(),
            problems,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// 运行器发给协调器的消息
#[derive(Debug)]
pub enum RunnerEvent {
    /// 单个用例结束
    CaseFinished(CaseOutcome),

    /// 一个文件的运行器完成了全部工作
    RunnerFinished { source: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_from_outcome() {
        let outcome = CaseOutcome::new(
            "adds numbers".to_string(),
            CaseState::Failed,
            "tests/math.http".to_string(),
        );

        let problem = Problem::from_outcome(&outcome);
        assert_eq!(problem.message, "adds numbers [failed]");
        assert_eq!(problem.severity, 1);
        assert_eq!(problem.line_content, "");
        assert_eq!(problem.source, "tests/math.http");
    }

    #[test]
    fn test_problem_serializes_with_camel_case_line_content() {
        let problem = Problem {
            message: "x [errored]".to_string(),
            severity: PROBLEM_SEVERITY,
            line_content: String::new(),
            source: "a.http".to_string(),
        };

        let json = serde_json::to_string(&problem).unwrap();
        assert_eq!(
            json,
            r#"{"message":"x [errored]","severity":1,"lineContent":"","source":"a.http"}"#
        );
    }

    #[test]
    fn test_empty_report_shape() {
        let report = AggregateReport::empty();
        assert!(report.is_clean());

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"results":[],"problems":[]}"#);
    }

    #[test]
    fn test_outcome_accepted_states() {
        let accepted = CaseOutcome::new("a".into(), CaseState::Pending, "f".into());
        assert!(accepted.is_accepted());

        let rejected = CaseOutcome::new("a".into(), CaseState::Errored, "f".into());
        assert!(!rejected.is_accepted());
    }
}
