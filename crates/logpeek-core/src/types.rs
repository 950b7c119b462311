//! Core domain type definitions

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One line of the loaded log file
///
/// Lines are immutable once parsed; `index` is the line's position in the
/// file and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub index: usize,
    pub text: String,
    /// Severity detected from the line content, if any
    pub level: Option<LogLevel>,
    /// Timestamp from a structured (JSON) line, if any
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl LogLine {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            level: None,
            timestamp: None,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// 1-based line number for display
    pub fn line_number(&self) -> usize {
        self.index + 1
    }
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Get severity rank (higher = more severe)
    pub fn severity(&self) -> u8 {
        match self {
            LogLevel::Trace => 0,
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warn => 3,
            LogLevel::Error => 4,
        }
    }

    /// Parse a level token as it appears in log lines
    ///
    /// Accepts the usual spellings case-insensitively (`warn`, `WARNING`,
    /// `err`, `fatal`, ...). Surrounding brackets and a trailing colon are
    /// ignored.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token
            .trim_start_matches('[')
            .trim_end_matches(':')
            .trim_end_matches(']');
        match token.to_ascii_lowercase().as_str() {
            "trace" | "trc" => Some(LogLevel::Trace),
            "debug" | "dbg" => Some(LogLevel::Debug),
            "info" | "inf" | "notice" => Some(LogLevel::Info),
            "warn" | "warning" | "wrn" => Some(LogLevel::Warn),
            "error" | "err" | "fatal" | "critical" | "crit" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Filter for log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelFilter {
    /// Show all logs
    #[default]
    All,
    /// Show only errors
    Errors,
    /// Show warnings and errors
    Warnings,
    /// Show info and above
    Info,
    /// Show debug and above
    Debug,
}

impl LevelFilter {
    /// Check if a line level passes this filter
    ///
    /// Lines without a detected level only pass `All`.
    pub fn matches(&self, level: Option<LogLevel>) -> bool {
        let minimum = match self {
            LevelFilter::All => return true,
            LevelFilter::Errors => LogLevel::Error,
            LevelFilter::Warnings => LogLevel::Warn,
            LevelFilter::Info => LogLevel::Info,
            LevelFilter::Debug => LogLevel::Debug,
        };
        level.is_some_and(|level| level.severity() >= minimum.severity())
    }

    /// Get display name for the filter
    pub fn display_name(&self) -> &'static str {
        match self {
            LevelFilter::All => "All levels",
            LevelFilter::Errors => "Errors only",
            LevelFilter::Warnings => "Warnings+",
            LevelFilter::Info => "Info+",
            LevelFilter::Debug => "Debug+",
        }
    }
}

impl std::str::FromStr for LevelFilter {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(LevelFilter::All),
            "error" | "errors" => Ok(LevelFilter::Errors),
            "warn" | "warning" | "warnings" => Ok(LevelFilter::Warnings),
            "info" => Ok(LevelFilter::Info),
            "debug" => Ok(LevelFilter::Debug),
            other => Err(crate::error::Error::invalid_request(format!(
                "unknown level filter '{other}'"
            ))),
        }
    }
}
