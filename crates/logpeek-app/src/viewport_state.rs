//! Viewport state - the window of display rows to render.
//!
//! Rows are positions in the display list, not line indices. The buffer
//! rows are extra context rendered above and below the visible rows.

use logpeek_core::{DisplayItem, DisplayList};

/// Default buffer rows for virtualized rendering
const DEFAULT_BUFFER_ROWS: usize = 10;

/// Scroll position over a display list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportState {
    /// First visible row
    pub offset: usize,
    /// Total number of rows in the display list
    pub total_rows: usize,
    /// Rows that fit on screen
    pub visible_rows: usize,
    /// Context rows rendered above/below the visible rows
    pub buffer_rows: usize,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            total_rows: 0,
            visible_rows: 0,
            buffer_rows: DEFAULT_BUFFER_ROWS,
        }
    }

    pub fn with_buffer_rows(mut self, buffer: usize) -> Self {
        self.buffer_rows = buffer;
        self
    }

    fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.visible_rows)
    }

    /// Rows to render, buffer included, as a half-open `(start, end)`
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.saturating_sub(self.buffer_rows);
        let end = self
            .offset
            .saturating_add(self.visible_rows)
            .saturating_add(self.buffer_rows)
            .min(self.total_rows);
        (start.min(end), end)
    }

    /// Display items inside the buffered visible range
    pub fn window<'l, 'a, L>(&self, list: &'l DisplayList<'a, L>) -> &'l [DisplayItem<'a, L>] {
        let (start, end) = self.visible_range();
        let end = end.min(list.len());
        &list.items[start.min(end)..end]
    }

    /// Put the first displayed line at or after `line_index` at the top
    ///
    /// Near the end of the list the offset stops at the last full page.
    pub fn jump_to_line<L>(&mut self, list: &DisplayList<'_, L>, line_index: usize) {
        self.offset = list.row_at_or_after(line_index).min(self.max_offset());
    }

    /// Update with new content size, clamping the offset
    pub fn update_content_size(&mut self, total: usize, visible: usize) {
        self.total_rows = total;
        self.visible_rows = visible;
        self.offset = self.offset.min(self.max_offset());
    }
}
