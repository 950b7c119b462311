//! Log file loading and per-line level detection.
//!
//! Structured (JSON object) lines contribute their `level` and `timestamp`
//! fields; plain text lines get a level from the first recognizable token
//! among their leading words.

use std::path::Path;

use chrono::DateTime;
use logpeek_core::prelude::*;
use logpeek_core::{LogLevel, LogLine};
use serde_json::Value;

/// Words inspected for a plain-text level token
const LEVEL_TOKEN_WORDS: usize = 3;

const JSON_LEVEL_KEYS: &[&str] = &["level", "severity", "lvl"];
const JSON_TIME_KEYS: &[&str] = &["timestamp", "time", "ts"];

/// Parse one raw line
pub fn parse_line(index: usize, raw: &str) -> LogLine {
    let mut line = LogLine::new(index, raw);

    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') {
        if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(trimmed) {
            line.level = JSON_LEVEL_KEYS
                .iter()
                .filter_map(|key| fields.get(*key)?.as_str())
                .find_map(LogLevel::from_token);
            line.timestamp = JSON_TIME_KEYS
                .iter()
                .filter_map(|key| fields.get(*key)?.as_str())
                .find_map(|ts| DateTime::parse_from_rfc3339(ts).ok());
            return line;
        }
    }

    line.level = trimmed
        .split_whitespace()
        .take(LEVEL_TOKEN_WORDS)
        .find_map(LogLevel::from_token);
    line
}

/// Parse file content into indexed lines
///
/// A trailing newline does not produce an extra empty line.
pub fn parse_lines(content: &str) -> Vec<LogLine> {
    content
        .lines()
        .enumerate()
        .map(|(index, raw)| parse_line(index, raw))
        .collect()
}

/// Read and parse a log file
///
/// Invalid UTF-8 is replaced rather than rejected; log files in the wild
/// are rarely clean.
pub fn read_log_file(path: &Path) -> Result<Vec<LogLine>> {
    if !path.exists() {
        return Err(Error::log_file_not_found(path));
    }
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);
    let lines = parse_lines(&content);
    info!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_plain_line_with_bracket_level() {
        let line = parse_line(0, "2024-05-01 12:00:00 [ERROR] connection refused");
        assert_eq!(line.level, Some(LogLevel::Error));
        assert!(line.timestamp.is_none());
        assert_eq!(line.text, "2024-05-01 12:00:00 [ERROR] connection refused");
    }

    #[test]
    fn test_parse_plain_line_with_colon_level() {
        let line = parse_line(3, "WARNING: disk almost full");
        assert_eq!(line.index, 3);
        assert_eq!(line.level, Some(LogLevel::Warn));
    }

    #[test]
    fn test_parse_plain_line_without_level() {
        let line = parse_line(0, "GET /health 200 1ms");
        assert!(line.level.is_none());
    }

    #[test]
    fn test_level_token_must_be_leading() {
        let line = parse_line(0, "request from client 42 failed with error");
        assert!(line.level.is_none());
    }

    #[test]
    fn test_parse_json_line() {
        let line = parse_line(
            7,
            r#"{"timestamp":"2024-05-01T12:00:00+02:00","level":"warn","msg":"slow query"}"#,
        );
        assert_eq!(line.level, Some(LogLevel::Warn));
        let ts = line.timestamp.unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-01T12:00:00+02:00");
    }

    #[test]
    fn test_parse_json_line_alternate_keys() {
        let line = parse_line(0, r#"{"severity":"ERROR","ts":"not a time"}"#);
        assert_eq!(line.level, Some(LogLevel::Error));
        assert!(line.timestamp.is_none());
    }

    #[test]
    fn test_parse_invalid_json_falls_back_to_text() {
        let line = parse_line(0, "{ERROR} not json");
        assert!(line.level.is_none());
        let line = parse_line(0, "{broken json here INFO");
        assert!(line.level.is_none());
    }

    #[test]
    fn test_parse_lines_indexes_in_order() {
        let lines = parse_lines("INFO start\nplain\nERROR boom\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].index, 2);
        assert_eq!(lines[2].level, Some(LogLevel::Error));
        assert_eq!(lines[1].text, "plain");
    }

    #[test]
    fn test_read_log_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("app.log");
        std::fs::write(&path, "INFO a\nWARN b\n").unwrap();

        let lines = read_log_file(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].level, Some(LogLevel::Warn));
    }

    #[test]
    fn test_read_log_file_invalid_utf8() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("binary.log");
        std::fs::write(&path, b"ok\n\xff\xfe broken\n").unwrap();

        let lines = read_log_file(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].text.contains("broken"));
    }

    #[test]
    fn test_read_missing_log_file() {
        let temp = tempdir().unwrap();
        let err = read_log_file(&temp.path().join("nope.log")).unwrap_err();
        assert!(matches!(err, Error::LogFileNotFound { .. }));
    }
}
