//! Line filter: regex query plus level filter, producing matching indices.

use regex::{Regex, RegexBuilder};

use logpeek_core::prelude::*;
use logpeek_core::{LevelFilter, LogLine, MatchingIndices};

/// Combined query and level filter
///
/// An empty query with [`LevelFilter::All`] matches every line.
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    /// The current query string
    query: String,
    /// Compiled query (None if query is empty)
    regex: Option<Regex>,
    /// Filter by log level
    level: LevelFilter,
    /// Match the query case-sensitively
    case_sensitive: bool,
}

impl LineFilter {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Set the query and compile it as a regex
    ///
    /// Returns whether the query changed. An invalid pattern leaves the
    /// filter untouched.
    pub fn set_query(&mut self, query: &str) -> Result<bool> {
        if query == self.query {
            return Ok(false);
        }

        if query.is_empty() {
            self.query.clear();
            self.regex = None;
            return Ok(true);
        }

        let regex = RegexBuilder::new(query)
            .case_insensitive(!self.case_sensitive)
            .build()
            .map_err(|e| Error::invalid_regex(query, e.to_string()))?;

        self.query = query.to_string();
        self.regex = Some(regex);
        Ok(true)
    }

    /// Set the level filter, returning whether it changed
    pub fn set_level(&mut self, level: LevelFilter) -> bool {
        let changed = self.level != level;
        self.level = level;
        changed
    }

    /// Check if a line passes both filters
    pub fn matches(&self, line: &LogLine) -> bool {
        self.level.matches(line.level)
            && self
                .regex
                .as_ref()
                .is_none_or(|regex| regex.is_match(&line.text))
    }

    /// Indices of all lines passing the filter
    pub fn matching_indices(&self, lines: &[LogLine]) -> MatchingIndices {
        let matching: MatchingIndices = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.matches(line))
            .map(|(index, _)| index)
            .collect();
        debug!(
            "Filter {:?} ({}) matched {} of {} lines",
            self.query,
            self.level.display_name(),
            matching.len(),
            lines.len()
        );
        matching
    }
}
