use crate::variable::context::VariableContext;
use regex::{Captures, Regex};
use std::sync::OnceLock;

// {{name}} 自定义变量和 ${NAME} 系统环境变量在一趟扫描里处理，
// 两种占位符不会互相嵌套
fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}|\$\{([A-Z_][A-Z0-9_]*)\}").unwrap()
    })
}

/// 变量替换器
///
/// 找不到对应值的占位符保持原样，让后续的失败信息仍然可读。
pub struct VariableResolver;

impl VariableResolver {
    /// 替换文本中的 {{variable}} 和 ${ENV_VAR} 占位符
    pub fn resolve(text: &str, context: &VariableContext) -> String {
        placeholder_regex()
            .replace_all(text, |caps: &Captures| {
                if let Some(name) = caps.get(1) {
                    match context.get(name.as_str()) {
                        Some(value) => value.to_string(),
                        None => caps[0].to_string(),
                    }
                } else if let Some(name) = caps.get(2) {
                    std::env::var(name.as_str()).unwrap_or_else(|_| caps[0].to_string())
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }

    /// 只展开 ${ENV_VAR} 引用，配置文件加载时使用
    pub fn resolve_env_vars(text: &str) -> String {
        Self::resolve(text, &VariableContext::new())
    }
}
