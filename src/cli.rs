use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rubridge::harness::{self, RunnerPool};
use rubridge::variable::{ConfigLoader, VariableContext};

/// 批量执行测试文档，并把聚合报告行写回给宿主构建工具
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON 文件映射数组，例如 '[["tests/api.http"]]'
    pub file_mappings: String,

    /// 变量配置文件路径（默认向上查找 rubridge.toml）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 使用的环境名（配置文件里的 [environments.<name>]）
    #[arg(long)]
    pub env: Option<String>,

    /// 额外变量覆盖，KEY=VALUE，可重复
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

pub async fn run(cli: Cli) -> Result<()> {
    // 参数槽必须在任何运行器启动之前解码成功，失败时直接中止，
    // 不产生报告行
    let mappings = harness::decode_file_mappings(&cli.file_mappings)
        .context("invalid file mappings argument")?;

    let variables = build_variables(&cli)?;

    let pool = RunnerPool::with_variables(variables);
    let report = pool.run(mappings).await;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    harness::write_report(&mut handle, &report)?;

    Ok(())
}

fn build_variables(cli: &Cli) -> Result<VariableContext> {
    let config = match &cli.config {
        // 显式指定的配置文件加载失败是致命的
        Some(path) => ConfigLoader::load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigLoader::find_and_load().unwrap_or_default(),
    };

    let mut cli_vars = Vec::new();
    for raw in &cli.vars {
        let parsed = ConfigLoader::parse_cli_var(raw)
            .ok_or_else(|| anyhow::anyhow!("invalid --var '{}', expected KEY=VALUE", raw))?;
        cli_vars.push(parsed);
    }

    Ok(ConfigLoader::build_context(
        &config,
        cli.env.as_deref(),
        &cli_vars,
    ))
}
