use std::collections::HashMap;

/// 变量上下文
///
/// 解析器产出的 URL、Header 和请求体里的 {{name}} 占位符都从
/// 这里取值。上下文在池启动前构建完成，运行期间只读。
#[derive(Debug, Clone, Default)]
pub struct VariableContext {
    entries: HashMap<String, String>,
}

impl VariableContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一个变量，同名变量被覆盖
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for VariableContext {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
