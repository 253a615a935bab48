use serde_json::Value;

/// 一条文件映射：源测试文件路径加可选的目标路径
///
/// 宿主传来的每个映射是一个序列，第一项是源路径；后续项（构建
/// 产物路径等）对本工具只有第二项有意义，多余的会被忽略。
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMapping {
    pub source: String,
    pub target: Option<String>,
}

impl SourceMapping {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// 参数槽解码错误
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid mappings JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("mappings must be a JSON array")]
    NotAnArray,

    #[error("mapping at index {index} must be a sequence")]
    NotASequence { index: usize },

    #[error("mapping at index {index} is missing the source path")]
    MissingSource { index: usize },

    #[error("mapping at index {index} has an invalid source path")]
    InvalidSource { index: usize },
}

/// 解码参数槽中的 JSON 文件映射数组
///
/// 任何一个元素不合法都会让整体解码失败；调用方必须在启动任何
/// 运行器之前中止，并且不产生报告行。
pub fn decode_file_mappings(raw: &str) -> Result<Vec<SourceMapping>, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;

    let entries = match value {
        Value::Array(entries) => entries,
        _ => return Err(DecodeError::NotAnArray),
    };

    let mut mappings = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let parts = match entry {
            Value::Array(parts) => parts,
            _ => return Err(DecodeError::NotASequence { index }),
        };

        let source = match parts.first() {
            None => return Err(DecodeError::MissingSource { index }),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(_) => return Err(DecodeError::InvalidSource { index }),
        };

        let target = match parts.get(1) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        mappings.push(SourceMapping { source, target });
    }

    Ok(mappings)
}
