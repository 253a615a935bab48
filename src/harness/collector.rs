use crate::harness::types::{AggregateReport, CaseOutcome, Problem};

/// 结果收集器
///
/// 按到达顺序把不可接受的用例结局记成问题；可接受的结局只计数。
/// 不做去重：同名用例失败多少次就上报多少条。
#[derive(Debug, Default)]
pub struct ResultCollector {
    problems: Vec<Problem>,
    accepted: usize,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个用例结局
    pub fn observe(&mut self, outcome: &CaseOutcome) {
        if outcome.is_accepted() {
            self.accepted += 1;
            tracing::trace!(
                title = %outcome.title,
                state = %outcome.state,
                "case accepted"
            );
        } else {
            tracing::debug!(
                title = %outcome.title,
                state = %outcome.state,
                source = %outcome.source,
                "case recorded as problem"
            );
            self.problems.push(Problem::from_outcome(outcome));
        }
    }

    /// 已接受的用例数
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// 已记录的问题数
    pub fn problem_count(&self) -> usize {
        self.problems.len()
    }

    /// 结束收集，产出聚合报告
    pub fn into_report(self) -> AggregateReport {
        AggregateReport::new(self.problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::CaseState;

    fn outcome(title: &str, state: CaseState, source: &str) -> CaseOutcome {
        CaseOutcome::new(title.to_string(), state, source.to_string())
    }

    #[test]
    fn test_accepted_states_produce_no_problems() {
        let mut collector = ResultCollector::new();

        collector.observe(&outcome("a", CaseState::Passed, "f.http"));
        collector.observe(&outcome("b", CaseState::Pending, "f.http"));

        assert_eq!(collector.accepted(), 2);
        assert_eq!(collector.problem_count(), 0);
        assert!(collector.into_report().is_clean());
    }

    #[test]
    fn test_problem_order_is_arrival_order() {
        let mut collector = ResultCollector::new();

        collector.observe(&outcome("late", CaseState::Failed, "b.http"));
        collector.observe(&outcome("early", CaseState::Errored, "a.http"));

        let report = collector.into_report();
        assert_eq!(report.problems.len(), 2);
        assert_eq!(report.problems[0].message, "late [failed]");
        assert_eq!(report.problems[1].message, "early [errored]");
    }

    #[test]
    fn test_no_deduplication() {
        let mut collector = ResultCollector::new();

        let repeated = outcome("same title", CaseState::Failed, "f.http");
        collector.observe(&repeated);
        collector.observe(&repeated);

        assert_eq!(collector.problem_count(), 2);
    }

    #[test]
    fn test_problem_fields() {
        let mut collector = ResultCollector::new();
        collector.observe(&outcome("adds numbers", CaseState::Failed, "tests/math.http"));

        let report = collector.into_report();
        let problem = &report.problems[0];
        assert_eq!(problem.message, "adds numbers [failed]");
        assert_eq!(problem.severity, 1);
        assert_eq!(problem.line_content, "");
        assert_eq!(problem.source, "tests/math.http");
    }
}
