use crate::runner::types::{CaseResult, CaseState, RunSummary};
use colored::Colorize;

/// 进度打印器
///
/// 把每个用例的进展打印到 stdout。这些行是给人看的，宿主端
/// 按行过滤时会把它们当作普通输出忽略掉。
pub struct ProgressPrinter;

impl ProgressPrinter {
    pub fn new() -> Self {
        Self
    }

    /// 打印文件开始执行
    pub fn file_started(&self, path: &str, total: usize) {
        println!("\nRunning {} cases from {}...\n", total, path.bold());
    }

    /// 打印单个用例结果
    pub fn case_finished(&self, result: &CaseResult) {
        let symbol = match result.state {
            CaseState::Passed => "✓".green(),
            CaseState::Failed => "✗".red(),
            CaseState::Pending => "⊘".dimmed(),
            CaseState::Errored => "!".yellow(),
        };

        let name_part = if let Some(ref name) = result.name {
            format!(" {} -", name)
        } else {
            String::new()
        };

        match result.state {
            CaseState::Pending => {
                println!(
                    " {} [{}]{} {} {} {}",
                    symbol,
                    result.case_number,
                    name_part,
                    result.method.cyan(),
                    result.url,
                    "(skipped)".dimmed()
                );
            }
            _ => {
                println!(
                    " {} [{}]{} {} {} ({}ms)",
                    symbol,
                    result.case_number,
                    name_part,
                    result.method.cyan(),
                    result.url,
                    result.duration.as_millis()
                );
            }
        }

        // 失败或出错时显示原因
        if let Some(error) = &result.error {
            println!("   {}: {}", "Error".red().bold(), error);
        }
    }

    /// 打印单个文件的执行摘要
    pub fn file_finished(&self, path: &str, summary: &RunSummary) {
        let verdict = if summary.all_accepted() {
            "ok".green()
        } else {
            "failing".red()
        };

        println!(
            "\n{}: {} ({} passed, {} failed, {} pending, {} errored, {:.3}s)\n",
            path.bold(),
            verdict,
            summary.passed,
            summary.failed,
            summary.pending,
            summary.errored,
            summary.total_duration.as_secs_f64()
        );
    }

    /// 文件无法加载时的提示
    pub fn file_failed(&self, path: &str, error: &str) {
        println!(" {} {} - {}", "✗".red(), path.bold(), error);
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}
