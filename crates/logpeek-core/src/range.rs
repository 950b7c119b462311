//! Forced ranges: half-open line intervals that stay visible regardless of
//! the active filter.
//!
//! Stored collections are always merged: sorted, pairwise disjoint and
//! non-adjacent. [`ForcedRanges`] is a cheaply clonable shared slice so that
//! "nothing changed" can be answered by pointer identity
//! ([`ForcedRanges::ptr_eq`]) instead of a deep comparison.

use std::ops::{Deref, Range};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` of line indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ForcedRange {
    pub start: usize,
    pub end: usize,
}

impl ForcedRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered (0 for degenerate ranges)
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for ForcedRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl std::fmt::Display for ForcedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Clamp a range into `[0, total_lines]`.
///
/// Returns `None` when the clamped interval is empty; callers drop such
/// ranges silently.
pub fn normalize_range(range: ForcedRange, total_lines: usize) -> Option<ForcedRange> {
    let start = range.start.min(total_lines);
    let end = range.end.min(total_lines);
    if end <= start {
        return None;
    }
    Some(ForcedRange::new(start, end))
}

/// Merge ranges into a sorted, disjoint, non-adjacent sequence.
///
/// Ranges that overlap or touch (`next.start <= last.end`) are coalesced.
/// Empty ranges are dropped. Idempotent: merging a merged sequence returns
/// it unchanged.
pub fn merge_ranges<I>(ranges: I) -> Vec<ForcedRange>
where
    I: IntoIterator<Item = ForcedRange>,
{
    let mut sorted: Vec<ForcedRange> = ranges.into_iter().filter(|r| !r.is_empty()).collect();
    sorted.sort_unstable();

    let mut merged: Vec<ForcedRange> = Vec::with_capacity(sorted.len());
    for current in sorted {
        match merged.last_mut() {
            Some(last) if current.start <= last.end => {
                last.end = last.end.max(current.end);
            }
            _ => merged.push(current),
        }
    }
    merged
}

/// Shared, immutable, merged collection of forced ranges
///
/// Cloning shares the underlying allocation. Two values are the "same
/// collection" in the re-render sense when [`ForcedRanges::ptr_eq`] holds;
/// `==` compares contents.
#[derive(Debug, Clone)]
pub struct ForcedRanges(Arc<[ForcedRange]>);

impl Default for ForcedRanges {
    fn default() -> Self {
        Self::new()
    }
}

impl ForcedRanges {
    /// An empty collection
    pub fn new() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Build a collection from arbitrary ranges, merging them first
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = ForcedRange>,
    {
        Self::from_merged(merge_ranges(ranges))
    }

    /// Wrap ranges that are already merged
    pub(crate) fn from_merged(merged: Vec<ForcedRange>) -> Self {
        debug_assert!(merged.windows(2).all(|w| w[0].end < w[1].start));
        Self(Arc::from(merged))
    }

    /// True when both values share the same allocation
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn as_slice(&self) -> &[ForcedRange] {
        &self.0
    }

    /// Whether `index` falls inside any stored range (binary search)
    pub fn contains(&self, index: usize) -> bool {
        let pos = self.0.partition_point(|r| r.end <= index);
        self.0.get(pos).is_some_and(|r| r.contains(index))
    }

    /// Total number of lines covered by all ranges
    pub fn covered_len(&self) -> usize {
        self.0.iter().map(ForcedRange::len).sum()
    }
}

impl Deref for ForcedRanges {
    type Target = [ForcedRange];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for ForcedRanges {
    fn eq(&self, other: &Self) -> bool {
        self.0[..] == other.0[..]
    }
}

impl Eq for ForcedRanges {}

impl FromIterator<ForcedRange> for ForcedRanges {
    fn from_iter<T: IntoIterator<Item = ForcedRange>>(iter: T) -> Self {
        Self::from_ranges(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn r(start: usize, end: usize) -> ForcedRange {
        ForcedRange::new(start, end)
    }

    #[test]
    fn test_normalize_range_inside_bounds() {
        assert_eq!(normalize_range(r(3, 8), 10), Some(r(3, 8)));
    }

    #[test]
    fn test_normalize_range_clamps_end() {
        assert_eq!(normalize_range(r(5, 50), 10), Some(r(5, 10)));
    }

    #[test]
    fn test_normalize_range_drops_out_of_bounds() {
        assert_eq!(normalize_range(r(12, 20), 10), None);
        assert_eq!(normalize_range(r(10, 11), 10), None);
    }

    #[test]
    fn test_normalize_range_drops_empty_and_inverted() {
        assert_eq!(normalize_range(r(4, 4), 10), None);
        assert_eq!(normalize_range(r(7, 2), 10), None);
    }

    #[test]
    fn test_merge_overlapping_and_separate() {
        let merged = merge_ranges(vec![r(5, 10), r(8, 12), r(15, 20)]);
        assert_eq!(merged, vec![r(5, 12), r(15, 20)]);
    }

    #[test]
    fn test_merge_touching_ranges_coalesce() {
        let merged = merge_ranges(vec![r(10, 20), r(0, 10)]);
        assert_eq!(merged, vec![r(0, 20)]);
    }

    #[test]
    fn test_merge_contained_range() {
        let merged = merge_ranges(vec![r(0, 100), r(10, 20), r(99, 100)]);
        assert_eq!(merged, vec![r(0, 100)]);
    }

    #[test]
    fn test_merge_unsorted_input() {
        let merged = merge_ranges(vec![r(30, 40), r(1, 2), r(15, 16)]);
        assert_eq!(merged, vec![r(1, 2), r(15, 16), r(30, 40)]);
    }

    #[test]
    fn test_merge_empty_input() {
        assert!(merge_ranges(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_drops_empty_ranges() {
        let merged = merge_ranges(vec![r(3, 3), r(5, 6)]);
        assert_eq!(merged, vec![r(5, 6)]);
    }

    #[test]
    fn test_forced_ranges_contains() {
        let ranges = ForcedRanges::from_ranges(vec![r(2, 4), r(10, 12)]);
        assert!(!ranges.contains(1));
        assert!(ranges.contains(2));
        assert!(ranges.contains(3));
        assert!(!ranges.contains(4));
        assert!(ranges.contains(11));
        assert!(!ranges.contains(12));
        assert!(!ForcedRanges::new().contains(0));
    }

    #[test]
    fn test_forced_ranges_covered_len() {
        let ranges = ForcedRanges::from_ranges(vec![r(0, 5), r(3, 8), r(20, 21)]);
        assert_eq!(ranges.covered_len(), 9);
    }

    #[test]
    fn test_forced_ranges_clone_shares_allocation() {
        let a = ForcedRanges::from_ranges(vec![r(1, 3)]);
        let b = a.clone();
        assert!(ForcedRanges::ptr_eq(&a, &b));

        let c = ForcedRanges::from_ranges(vec![r(1, 3)]);
        assert_eq!(a, c);
        assert!(!ForcedRanges::ptr_eq(&a, &c));
    }

    fn arb_ranges() -> impl Strategy<Value = Vec<ForcedRange>> {
        prop::collection::vec((0usize..200, 0usize..40), 0..30).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(start, len)| ForcedRange::new(start, start + len))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(ranges in arb_ranges()) {
            let once = merge_ranges(ranges);
            let twice = merge_ranges(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn merge_output_sorted_disjoint_non_adjacent(ranges in arb_ranges()) {
            let merged = merge_ranges(ranges);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].end < pair[1].start);
            }
            prop_assert!(merged.iter().all(|r| !r.is_empty()));
        }

        #[test]
        fn merge_preserves_coverage(ranges in arb_ranges()) {
            let merged = ForcedRanges::from_ranges(ranges.clone());
            for index in 0..250 {
                let expected = ranges.iter().any(|r| r.contains(index));
                prop_assert_eq!(merged.contains(index), expected);
            }
        }
    }
}
