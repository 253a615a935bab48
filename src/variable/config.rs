use crate::variable::context::VariableContext;
use crate::variable::resolver::VariableResolver;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 一个命名环境下的变量表
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Environment {
    #[serde(flatten)]
    pub variables: HashMap<String, String>,
}

/// 变量配置文件
///
/// TOML 形状：每个 [environments.<name>] 表是一组变量。
#[derive(Debug, Clone, Deserialize, Default)]
pub struct VariableConfig {
    #[serde(default)]
    pub environments: HashMap<String, Environment>,
}

impl VariableConfig {
    pub fn get_environment(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }
}

/// 配置文件加载失败的原因
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    const CONFIG_FILE: &'static str = "rubridge.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<VariableConfig, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// 按约定位置查找并加载配置文件
    ///
    /// 先从当前目录逐级向上找 rubridge.toml，找不到再看
    /// ~/.config/rubridge/rubridge.toml。都没有时返回 None。
    pub fn find_and_load() -> Option<VariableConfig> {
        Self::discover_path().and_then(|path| Self::load_from_path(path).ok())
    }

    fn discover_path() -> Option<PathBuf> {
        if let Ok(mut dir) = std::env::current_dir() {
            loop {
                let candidate = dir.join(Self::CONFIG_FILE);
                if candidate.exists() {
                    return Some(candidate);
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let candidate = dirs::home_dir()?
            .join(".config")
            .join("rubridge")
            .join(Self::CONFIG_FILE);
        candidate.exists().then_some(candidate)
    }

    /// 用配置、环境名和 CLI 覆盖构建变量上下文
    ///
    /// 配置值里的 ${ENV_VAR} 在这里解析一次；CLI 覆盖最后写入，
    /// 优先级最高。
    pub fn build_context(
        config: &VariableConfig,
        env_name: Option<&str>,
        cli_vars: &[(String, String)],
    ) -> VariableContext {
        let mut context = VariableContext::new();

        if let Some(env) = env_name.and_then(|name| config.get_environment(name)) {
            for (name, value) in &env.variables {
                context.insert(name.clone(), VariableResolver::resolve_env_vars(value));
            }
        }

        for (name, value) in cli_vars {
            context.insert(name.clone(), value.clone());
        }

        context
    }

    /// 解析 --var KEY=VALUE 形式的覆盖项
    pub fn parse_cli_var(raw: &str) -> Option<(String, String)> {
        let (key, value) = raw.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.trim().to_string()))
    }
}
