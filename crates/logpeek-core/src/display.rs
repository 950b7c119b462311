//! Display list builder: filtered matches plus forced ranges, in file order,
//! with gap metadata on every row.

use serde::Serialize;

use crate::gap::{line_gaps, GapInfo, LineGaps};
use crate::matching::MatchingIndices;
use crate::range::{merge_ranges, normalize_range, ForcedRange};

/// One renderable row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem<'a, L> {
    /// Underlying line payload
    pub line: &'a L,
    /// Position of the line in the full sequence
    pub index: usize,
    pub gap_above: Option<GapInfo>,
    pub gap_below: Option<GapInfo>,
}

/// Ordered display items with the parallel index array
///
/// The index array is what a windowing renderer keeps to map virtual rows
/// back to lines; `items[row].index == indices[row]` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayList<'a, L> {
    pub items: Vec<DisplayItem<'a, L>>,
    pub indices: Vec<usize>,
}

impl<L> Default for DisplayList<'_, L> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            indices: Vec::new(),
        }
    }
}

impl<'a, L> DisplayList<'a, L> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Row of the first displayed line at or after `line_index`
    ///
    /// Equals `len()` when every displayed line is before `line_index`.
    pub fn row_at_or_after(&self, line_index: usize) -> usize {
        self.indices.partition_point(|&i| i < line_index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayItem<'a, L>> {
        self.items.iter()
    }

    /// Total hidden lines across all gaps
    pub fn hidden_count(&self, total_lines: usize) -> usize {
        total_lines.saturating_sub(self.len())
    }
}

/// Sorted union of matching indices and forced ranges, clipped to
/// `[0, total_lines)`.
///
/// An empty match set yields an empty list even if forced ranges exist:
/// forced ranges widen a filtered view, they do not revive an empty one.
pub fn display_indices(
    matching: &MatchingIndices,
    total_lines: usize,
    forced_ranges: &[ForcedRange],
) -> Vec<usize> {
    if matching.is_empty() {
        return Vec::new();
    }

    let merged = merge_ranges(
        forced_ranges
            .iter()
            .filter_map(|r| normalize_range(*r, total_lines)),
    );
    let forced_len: usize = merged.iter().map(ForcedRange::len).sum();

    let mut indices = Vec::with_capacity(matching.len() + forced_len);
    let mut matches = matching
        .iter()
        .copied()
        .take_while(|&i| i < total_lines)
        .peekable();

    for range in &merged {
        while let Some(m) = matches.next_if(|&m| m < range.start) {
            indices.push(m);
        }
        indices.extend(range.as_range());
        while matches.next_if(|&m| m < range.end).is_some() {}
    }
    indices.extend(matches);
    indices
}

/// Build the display list for the current filter and forced ranges.
pub fn build_display_items<'a, L>(
    matching: &MatchingIndices,
    all_lines: &'a [L],
    forced_ranges: &[ForcedRange],
) -> DisplayList<'a, L> {
    let total_lines = all_lines.len();
    let indices = display_indices(matching, total_lines, forced_ranges);
    let items = items_for_indices(&indices, all_lines);

    tracing::trace!(
        "Built display list: {} of {} lines, {} forced ranges",
        indices.len(),
        total_lines,
        forced_ranges.len()
    );

    DisplayList { items, indices }
}

/// Materialize display items for already-computed indices.
///
/// Indices must be sorted and below `all_lines.len()`.
pub fn items_for_indices<'a, L>(indices: &[usize], all_lines: &'a [L]) -> Vec<DisplayItem<'a, L>> {
    let total_lines = all_lines.len();
    indices
        .iter()
        .enumerate()
        .map(|(pos, &index)| {
            let prev = pos.checked_sub(1).map(|p| indices[p]);
            let next = indices.get(pos + 1).copied();
            let LineGaps { up, down } = line_gaps(prev, index, next, total_lines);
            DisplayItem {
                line: &all_lines[index],
                index,
                gap_above: up,
                gap_below: down,
            }
        })
        .collect()
}
