use crate::parser::types::CaseMetadata;
use crate::parser::types::{Metadata, ParseError, ParseResult};
use std::time::Duration;

/// 主解析函数（统一入口）
pub fn parse_metadata(line: &str) -> ParseResult<Option<Metadata>> {
    let line = line.trim();
    if !line.starts_with('@') {
        return Ok(None);
    }

    // 分割指令和内容：@directive content
    let (directive, content) = match line.split_once(|c: char| c.is_whitespace()) {
        Some((d, c)) => (d, c.trim()),
        None => (line, ""),
    };

    match directive {
        "@name" => parse_name(content).map(Some),
        "@skip" => parse_skip(content).map(Some),
        "@timeout" => parse_timeout(content).map(Some),
        "@status" => parse_status(content).map(Some),
        _ => Ok(None), // 未识别的元数据
    }
}

/// 应用元数据到 CaseMetadata
#[inline]
pub fn apply_metadata(metadata: &Metadata, target: &mut CaseMetadata) {
    match metadata {
        Metadata::Name(name) => {
            target.name = Some(name.clone());
        }
        Metadata::Skip(skip) => {
            target.skip = *skip;
        }
        Metadata::Timeout(duration) => {
            target.timeout = Some(*duration);
        }
        Metadata::ExpectedStatus(status) => {
            target.expected_status = Some(*status);
        }
    }
}

// === 各个解析器实现 ===

fn parse_name(content: &str) -> ParseResult<Metadata> {
    Ok(Metadata::Name(content.to_string()))
}

fn parse_skip(content: &str) -> ParseResult<Metadata> {
    let value = if content.is_empty() {
        true
    } else {
        content.parse::<bool>().unwrap_or(true)
    };
    Ok(Metadata::Skip(value))
}

fn parse_timeout(content: &str) -> ParseResult<Metadata> {
    let duration = parse_duration(content)?;
    Ok(Metadata::Timeout(duration))
}

fn parse_status(content: &str) -> ParseResult<Metadata> {
    let status: u16 = content.parse().map_err(|_| ParseError::InvalidMetadata {
        line: 0,
        message: format!("Invalid status code: {}", content),
    })?;

    if !(100..600).contains(&status) {
        return Err(ParseError::InvalidStatus { status });
    }

    Ok(Metadata::ExpectedStatus(status))
}

/// 解析时间字符串（支持 "5s", "1000ms", "2m"）
pub fn parse_duration(s: &str) -> ParseResult<Duration> {
    let s = s.trim();

    if let Some(ms) = s.strip_suffix("ms") {
        let millis: u64 = ms.parse().map_err(|_| ParseError::InvalidMetadata {
            line: 0,
            message: format!("Invalid duration: {}", s),
        })?;
        Ok(Duration::from_millis(millis))
    } else if let Some(sec) = s.strip_suffix('s') {
        let secs: u64 = sec.parse().map_err(|_| ParseError::InvalidMetadata {
            line: 0,
            message: format!("Invalid duration: {}", s),
        })?;
        Ok(Duration::from_secs(secs))
    } else if let Some(min) = s.strip_suffix('m') {
        let mins: u64 = min.parse().map_err(|_| ParseError::InvalidMetadata {
            line: 0,
            message: format!("Invalid duration: {}", s),
        })?;
        Ok(Duration::from_secs(mins * 60))
    } else {
        Err(ParseError::InvalidMetadata {
            line: 0,
            message: format!("Duration must end with 'ms', 's', or 'm': {}", s),
        })
    }
}
