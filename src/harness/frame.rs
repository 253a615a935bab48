use std::io::Write;

use crate::harness::types::AggregateReport;
use crate::{Result, RubridgeError};

/// 报告行的哨兵前缀字节
///
/// 宿主把混合输出按行切分，只有以这个字节开头的行才是报告，
/// 其余一律当作普通输出丢弃。
pub const REPORT_SENTINEL: u8 = 0x10;

/// 把报告编码成带哨兵前缀的单行文本（不含结尾换行）
pub fn encode_report(report: &AggregateReport) -> Result<String> {
    let json = serde_json::to_string(report)?;

    let mut line = String::with_capacity(json.len() + 1);
    line.push(REPORT_SENTINEL as char);
    line.push_str(&json);
    Ok(line)
}

/// 把报告作为一整行写入输出流并刷新
pub fn write_report<W: Write>(writer: &mut W, report: &AggregateReport) -> Result<()> {
    let line = encode_report(report)?;
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}

/// 在混合输出中找到报告行的 JSON 部分
pub fn find_report_line(output: &str) -> Option<&str> {
    output
        .lines()
        .find_map(|line| line.strip_prefix(REPORT_SENTINEL as char))
}

/// 宿主端解码：从混合输出中取出聚合报告
pub fn decode_report(output: &str) -> Result<AggregateReport> {
    let json = find_report_line(output)
        .ok_or_else(|| RubridgeError::Other("no report line in output".to_string()))?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::types::{CaseOutcome, Problem};
    use crate::runner::CaseState;

    #[test]
    fn test_encode_empty_report() {
        let line = encode_report(&AggregateReport::empty()).unwrap();
        assert_eq!(line, "\u{10}{\"results\":[],\"problems\":[]}");
        assert_eq!(line.as_bytes()[0], REPORT_SENTINEL);
    }

    #[test]
    fn test_encode_report_with_problem() {
        let outcome = CaseOutcome::new(
            "adds numbers".to_string(),
            CaseState::Failed,
            "tests/math.http".to_string(),
        );
        let report = AggregateReport::new(vec![Problem::from_outcome(&outcome)]);

        let line = encode_report(&report).unwrap();
        assert_eq!(
            line,
            "\u{10}{\"results\":[],\"problems\":[{\"message\":\"adds numbers [failed]\",\
             \"severity\":1,\"lineContent\":\"\",\"source\":\"tests/math.http\"}]}"
        );
    }

    #[test]
    fn test_write_report_ends_with_newline() {
        let mut buffer = Vec::new();
        write_report(&mut buffer, &AggregateReport::empty()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\u{10}').count(), 1);
    }

    #[test]
    fn test_decode_among_noise() {
        let output = "\n  some progress line\n ✓ [1] GET http://x (3ms)\n\
                      \u{10}{\"results\":[],\"problems\":[]}\ntrailing noise\n";

        let report = decode_report(output).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_decode_round_trip() {
        let outcome = CaseOutcome::new(
            "t".to_string(),
            CaseState::Errored,
            "a.http".to_string(),
        );
        let report = AggregateReport::new(vec![Problem::from_outcome(&outcome)]);

        let mut buffer = Vec::new();
        write_report(&mut buffer, &report).unwrap();

        let decoded = decode_report(&String::from_utf8(buffer).unwrap()).unwrap();
        assert_eq!(decoded, report);
    }

    #[test]
    fn test_decode_missing_report_is_error() {
        assert!(decode_report("just noise\nno sentinel here\n").is_err());
    }
}
