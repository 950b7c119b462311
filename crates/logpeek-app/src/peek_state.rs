//! Peek state - the owner of lines, filter, matches and forced ranges.
//!
//! Forced ranges start empty, only grow through expansion actions, and are
//! reset whenever the filter changes or the log data is replaced: a new
//! search invalidates earlier "unhide" decisions.
//!
//! The displayed index array is recomputed eagerly on every real change and
//! [`PeekState::generation`] is bumped, so a renderer can skip work when the
//! generation it last drew is still current.

use logpeek_core::prelude::*;
use logpeek_core::{
    calculate_gap_expansion, display_indices, get_gap_info_for_line, items_for_indices,
    DisplayList, ExpandMode, ExpansionRequest, ForcedRanges, LevelFilter, LineGaps, LogLine,
    MatchingIndices,
};

use crate::config::Settings;
use crate::filter::LineFilter;

#[derive(Debug, Clone)]
pub struct PeekState {
    lines: Vec<LogLine>,
    filter: LineFilter,
    matching: MatchingIndices,
    forced: ForcedRanges,
    /// Sorted indices of the current display list
    displayed: Vec<usize>,
    /// Lines revealed by a click expansion
    expand_step: usize,
    generation: u64,
}

impl PeekState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            lines: Vec::new(),
            filter: LineFilter::new(settings.search.case_sensitive),
            matching: MatchingIndices::new(),
            forced: ForcedRanges::new(),
            displayed: Vec::new(),
            expand_step: settings.view.expand_step,
            generation: 0,
        }
    }

    pub fn with_lines(lines: Vec<LogLine>, settings: &Settings) -> Self {
        let mut state = Self::new(settings);
        state.load_lines(lines);
        state
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn filter(&self) -> &LineFilter {
        &self.filter
    }

    pub fn matching(&self) -> &MatchingIndices {
        &self.matching
    }

    pub fn forced_ranges(&self) -> &ForcedRanges {
        &self.forced
    }

    pub fn displayed_indices(&self) -> &[usize] {
        &self.displayed
    }

    /// Bumped on every change to the displayed set
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current display list, borrowing the loaded lines
    pub fn display(&self) -> DisplayList<'_, LogLine> {
        DisplayList {
            items: items_for_indices(&self.displayed, &self.lines),
            indices: self.displayed.clone(),
        }
    }

    /// Gaps around one displayed line, without rebuilding the list
    pub fn gap_info(&self, line_index: usize) -> LineGaps {
        get_gap_info_for_line(line_index, &self.displayed, self.lines.len())
    }

    // ─────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────

    /// Replace all lines; forced ranges are reset
    pub fn load_lines(&mut self, lines: Vec<LogLine>) {
        self.lines = lines;
        for (index, line) in self.lines.iter_mut().enumerate() {
            line.index = index;
        }
        self.forced = ForcedRanges::new();
        self.refilter();
    }

    /// Append lines at the end of the file
    ///
    /// Existing indices stay valid, so forced ranges are kept and only the
    /// new lines are run through the filter.
    pub fn append_lines(&mut self, lines: impl IntoIterator<Item = LogLine>) {
        let before = self.lines.len();
        for mut line in lines {
            line.index = self.lines.len();
            if self.filter.matches(&line) {
                self.matching.push(line.index);
            }
            self.lines.push(line);
        }
        if self.lines.len() != before {
            trace!("Appended {} lines", self.lines.len() - before);
            self.recompute();
        }
    }

    /// Drop all lines, matches and forced ranges
    pub fn clear(&mut self) {
        self.lines.clear();
        self.matching = MatchingIndices::new();
        self.forced = ForcedRanges::new();
        debug!("Cleared log data");
        self.recompute();
    }

    // ─────────────────────────────────────────────────────────────
    // Filter
    // ─────────────────────────────────────────────────────────────

    /// Change the query
    ///
    /// A changed query re-filters and resets forced ranges. Returns whether
    /// anything changed; an invalid pattern is an error and leaves the
    /// state as it was.
    pub fn set_query(&mut self, query: &str) -> Result<bool> {
        if !self.filter.set_query(query)? {
            return Ok(false);
        }
        self.reset_forced_ranges();
        self.refilter();
        Ok(true)
    }

    /// Change the level filter with the same reset semantics as a query
    pub fn set_level_filter(&mut self, level: LevelFilter) -> bool {
        if !self.filter.set_level(level) {
            return false;
        }
        self.reset_forced_ranges();
        self.refilter();
        true
    }

    // ─────────────────────────────────────────────────────────────
    // Expansion
    // ─────────────────────────────────────────────────────────────

    /// Apply an expansion request
    ///
    /// Returns `false` when the request changed nothing (the calculator
    /// handed back the same forced-range instance).
    pub fn expand(&mut self, request: &ExpansionRequest) -> bool {
        let next = calculate_gap_expansion(
            request,
            &self.displayed,
            self.lines.len(),
            &self.forced,
            Some(&self.matching),
        );
        if ForcedRanges::ptr_eq(&next, &self.forced) {
            return false;
        }
        debug!(
            "Expansion {} {} now forces {} lines",
            request.gap_id,
            request.mode,
            next.covered_len()
        );
        self.forced = next;
        self.recompute();
        true
    }

    /// Click action on a gap marker: reveal `expand_step` lines
    pub fn expand_step(&mut self, gap_id: &str) -> bool {
        self.expand(&ExpansionRequest::new(
            gap_id,
            ExpandMode::Count(self.expand_step),
        ))
    }

    fn reset_forced_ranges(&mut self) {
        if !self.forced.is_empty() {
            debug!("Filter changed, dropping {} forced ranges", self.forced.len());
        }
        self.forced = ForcedRanges::new();
    }

    fn refilter(&mut self) {
        self.matching = self.filter.matching_indices(&self.lines);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.displayed = display_indices(&self.matching, self.lines.len(), &self.forced);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logpeek_core::{Boundary, ForcedRange, GapId, LogLevel};

    /// 200 lines; lines 76 and 157 contain "needle"
    fn haystack() -> Vec<LogLine> {
        (0..200)
            .map(|i| {
                let text = if i == 76 || i == 157 {
                    format!("line {i} needle")
                } else {
                    format!("line {i}")
                };
                LogLine::new(i, text)
            })
            .collect()
    }

    fn state() -> PeekState {
        let mut state = PeekState::with_lines(haystack(), &Settings::default());
        state.set_query("needle").unwrap();
        state
    }

    #[test]
    fn test_initial_state_shows_everything() {
        let state = PeekState::with_lines(haystack(), &Settings::default());
        assert_eq!(state.displayed_indices().len(), 200);
        assert!(state.forced_ranges().is_empty());
    }

    #[test]
    fn test_new_starts_empty_then_loads() {
        let mut state = PeekState::new(&Settings::default());
        assert_eq!(state.total_lines(), 0);
        assert!(state.display().is_empty());

        state.load_lines(haystack());
        assert_eq!(state.displayed_indices().len(), 200);
    }

    #[test]
    fn test_query_filters_lines() {
        let state = state();
        assert_eq!(state.displayed_indices(), &[76, 157]);
        assert_eq!(state.matching().as_slice(), &[76, 157]);
    }

    #[test]
    fn test_expand_step_uses_settings() {
        let mut settings = Settings::default();
        settings.view.expand_step = 3;
        let mut state = PeekState::with_lines(haystack(), &settings);
        state.set_query("needle").unwrap();

        assert!(state.expand_step("down-76"));
        assert_eq!(state.displayed_indices(), &[76, 77, 78, 79, 157]);
    }

    #[test]
    fn test_expand_reports_noop() {
        let mut state = state();
        let generation = state.generation();
        assert!(!state.expand(&ExpansionRequest::new("down-77", ExpandMode::All)));
        assert!(!state.expand(&ExpansionRequest::new("garbage", ExpandMode::All)));
        assert_eq!(state.generation(), generation);
    }

    #[test]
    fn test_expand_then_gap_info() {
        let mut state = state();
        assert!(state.expand_step("down-76"));
        let gaps = state.gap_info(86);
        assert_eq!(gaps.down.unwrap().remaining_gap, 70);
        assert!(state.gap_info(80).down.is_none());
    }

    #[test]
    fn test_expand_prev_match_with_boundary() {
        let mut state = state();
        let request = ExpansionRequest::new("up-157", ExpandMode::PrevMatch)
            .with_prev_boundary(Boundary::new(70, 76));
        assert!(state.expand(&request));
        assert_eq!(state.forced_ranges().as_slice(), &[ForcedRange::new(76, 157)]);
        assert!(state.gap_info(157).up.is_none());
    }

    #[test]
    fn test_query_change_resets_forced_ranges() {
        let mut state = state();
        state.expand_step("down-76");
        assert!(!state.forced_ranges().is_empty());

        assert!(state.set_query("line 1").unwrap());
        assert!(state.forced_ranges().is_empty());
    }

    #[test]
    fn test_same_query_keeps_forced_ranges() {
        let mut state = state();
        state.expand_step("down-76");
        let forced = state.forced_ranges().clone();

        assert!(!state.set_query("needle").unwrap());
        assert!(ForcedRanges::ptr_eq(state.forced_ranges(), &forced));
    }

    #[test]
    fn test_invalid_query_keeps_state() {
        let mut state = state();
        state.expand_step("down-76");
        let displayed = state.displayed_indices().to_vec();

        assert!(state.set_query("[").is_err());
        assert_eq!(state.displayed_indices(), displayed.as_slice());
        assert!(!state.forced_ranges().is_empty());
    }

    #[test]
    fn test_level_filter_change_resets_forced_ranges() {
        let mut lines = haystack();
        lines[10] = LogLine::new(10, "boom").with_level(LogLevel::Error);
        let mut state = PeekState::with_lines(lines, &Settings::default());
        state.set_query("needle").unwrap();
        state.expand_step("down-76");

        assert!(state.set_level_filter(LevelFilter::Errors));
        assert!(state.forced_ranges().is_empty());
        // "needle" lines carry no level, so nothing passes both filters
        assert!(state.displayed_indices().is_empty());
        assert!(!state.set_level_filter(LevelFilter::Errors));
    }

    #[test]
    fn test_empty_match_set_hides_forced_ranges() {
        let mut state = state();
        state.expand_step("down-76");
        state.set_query("no such line").unwrap();
        assert!(state.display().is_empty());
    }

    #[test]
    fn test_append_lines_keeps_forced_ranges() {
        let mut state = state();
        state.expand_step("down-76");
        let forced = state.forced_ranges().clone();

        state.append_lines(vec![
            LogLine::new(0, "late needle"),
            LogLine::new(0, "late hay"),
        ]);

        assert_eq!(state.total_lines(), 202);
        assert_eq!(state.lines()[200].index, 200);
        assert!(state.matching().contains(200));
        assert!(!state.matching().contains(201));
        assert!(ForcedRanges::ptr_eq(state.forced_ranges(), &forced));

        let gaps = state.gap_info(157);
        assert_eq!(gaps.down.unwrap().gap_id, GapId::down(157));
        assert_eq!(state.gap_info(200).down.unwrap().gap_size, 1);
    }

    #[test]
    fn test_append_nothing_is_noop() {
        let mut state = state();
        let generation = state.generation();
        state.append_lines(Vec::new());
        assert_eq!(state.generation(), generation);
    }

    #[test]
    fn test_clear() {
        let mut state = state();
        state.expand_step("down-76");
        state.clear();
        assert_eq!(state.total_lines(), 0);
        assert!(state.forced_ranges().is_empty());
        assert!(state.display().is_empty());
    }

    #[test]
    fn test_load_lines_reindexes_and_resets() {
        let mut state = state();
        state.expand_step("down-76");
        state.load_lines(vec![LogLine::new(9, "needle"), LogLine::new(9, "hay")]);
        assert_eq!(state.lines()[1].index, 1);
        assert!(state.forced_ranges().is_empty());
        assert_eq!(state.displayed_indices(), &[0]);
    }

    #[test]
    fn test_display_list_matches_displayed_indices() {
        let mut state = state();
        state.expand(&ExpansionRequest::new("down-157", ExpandMode::All));
        let list = state.display();
        assert_eq!(list.indices, state.displayed_indices());
        assert_eq!(list.items.last().unwrap().index, 199);
        assert!(list.items.last().unwrap().gap_below.is_none());
        assert_eq!(list.items[0].line.text, "line 76 needle");
    }
}
