use tokio::sync::mpsc;

use crate::harness::args::SourceMapping;
use crate::harness::collector::ResultCollector;
use crate::harness::types::{AggregateReport, CaseOutcome, RunnerEvent};
use crate::http::Client;
use crate::parser;
use crate::runner::{CaseExecutor, CaseState, ProgressPrinter, RunSummary};
use crate::variable::VariableContext;

/// 运行器池协调器
///
/// 为每个文件派生一个运行器任务，在单一收集循环里消费它们的
/// 事件。未完成计数从文件数递减到零，归零后恰好产出一次聚合
/// 报告；递减只发生在这个循环里，所以并行运行器不会导致重复
/// 产出。
pub struct RunnerPool {
    client: Client,
    variables: VariableContext,
}

impl RunnerPool {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            variables: VariableContext::new(),
        }
    }

    pub fn with_variables(variables: VariableContext) -> Self {
        Self {
            client: Client::new(),
            variables,
        }
    }

    /// 运行全部文件并聚合报告
    pub async fn run(&self, mappings: Vec<SourceMapping>) -> AggregateReport {
        let mut collector = ResultCollector::new();
        let mut outstanding = mappings.len();

        tracing::info!(files = outstanding, "starting runner pool");

        // 没有文件也要立即给宿主一份空报告
        if outstanding == 0 {
            return collector.into_report();
        }

        let (events, mut inbox) = mpsc::unbounded_channel();

        for mapping in mappings {
            let executor =
                CaseExecutor::with_variables(self.client.clone(), self.variables.clone());
            let runner = RunnerInstance::new(mapping, executor);
            let events = events.clone();

            tokio::spawn(async move { runner.run(events).await });
        }

        // 原始发送端必须在这里放掉，否则运行器全部退出后循环
        // 仍会永远等待
        drop(events);

        while outstanding > 0 {
            match inbox.recv().await {
                Some(RunnerEvent::CaseFinished(outcome)) => collector.observe(&outcome),
                Some(RunnerEvent::RunnerFinished { source }) => {
                    outstanding -= 1;
                    tracing::debug!(%source, outstanding, "runner finished");
                }
                None => {
                    // 所有发送端都消失了却还有运行器没报完成，
                    // 只能带着已收到的结果收场
                    tracing::warn!(
                        outstanding,
                        "event channel closed before all runners finished"
                    );
                    break;
                }
            }
        }

        tracing::info!(
            accepted = collector.accepted(),
            problems = collector.problem_count(),
            "all runners finished"
        );

        collector.into_report()
    }
}

impl Default for RunnerPool {
    fn default() -> Self {
        Self::new()
    }
}

/// 单个文件的运行器
///
/// 加载并执行一个测试文档，把每个用例的结局和自身的完成信号
/// 发回协调器。加载失败折算成一个出错用例，因此普通故障永远
/// 不会卡住报告。
struct RunnerInstance {
    mapping: SourceMapping,
    executor: CaseExecutor,
    progress: ProgressPrinter,
}

impl RunnerInstance {
    fn new(mapping: SourceMapping, executor: CaseExecutor) -> Self {
        Self {
            mapping,
            executor,
            progress: ProgressPrinter::new(),
        }
    }

    async fn run(self, events: mpsc::UnboundedSender<RunnerEvent>) {
        let source = self.mapping.source.clone();

        match parser::parse_path(&source) {
            Ok(document) => {
                self.progress.file_started(&source, document.cases.len());

                let mut results = Vec::with_capacity(document.cases.len());

                for (index, case) in document.cases.iter().enumerate() {
                    let result = self.executor.execute(case, index + 1).await;
                    self.progress.case_finished(&result);

                    let outcome = CaseOutcome::from_result(&result, &source);
                    results.push(result);

                    if events.send(RunnerEvent::CaseFinished(outcome)).is_err() {
                        // 收集端已经没了，继续执行没有意义
                        return;
                    }
                }

                self.progress
                    .file_finished(&source, &RunSummary::from_results(&results));
            }
            Err(e) => {
                let message = format!("failed to load test document: {}", e);
                self.progress.file_failed(&source, &message);

                let outcome = CaseOutcome::new(message, CaseState::Errored, source.clone());
                if events.send(RunnerEvent::CaseFinished(outcome)).is_err() {
                    return;
                }
            }
        }

        let _ = events.send(RunnerEvent::RunnerFinished { source });
    }
}
