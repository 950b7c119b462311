//! Sorted set of line indices that currently pass the filter.

use std::ops::Deref;

/// Matching line indices, sorted ascending with no duplicates
///
/// Produced by the filter layer. Neighbor queries used by the
/// `next-match`/`prev-match` expansion modes are binary searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchingIndices(Vec<usize>);

impl MatchingIndices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    /// Smallest match strictly inside `(after, before)`
    pub fn first_between(&self, after: usize, before: usize) -> Option<usize> {
        let pos = self.0.partition_point(|&i| i <= after);
        self.0.get(pos).copied().filter(|&i| i < before)
    }

    /// Largest match strictly below `before`
    pub fn last_before(&self, before: usize) -> Option<usize> {
        let pos = self.0.partition_point(|&i| i < before);
        pos.checked_sub(1).map(|p| self.0[p])
    }

    /// Append an index larger than every stored one
    ///
    /// Used for incremental filtering of newly appended lines. Indices that
    /// would break ordering are ignored.
    pub fn push(&mut self, index: usize) {
        if self.0.last().is_none_or(|&last| last < index) {
            self.0.push(index);
        }
    }
}

impl Deref for MatchingIndices {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<usize> for MatchingIndices {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut indices: Vec<usize> = iter.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self(indices)
    }
}

impl From<Vec<usize>> for MatchingIndices {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter_sorts_and_dedups() {
        let m: MatchingIndices = vec![9, 3, 3, 7, 1].into_iter().collect();
        assert_eq!(m.as_slice(), &[1, 3, 7, 9]);
    }

    #[test]
    fn test_contains() {
        let m = MatchingIndices::from(vec![76, 157]);
        assert!(m.contains(76));
        assert!(m.contains(157));
        assert!(!m.contains(77));
    }

    #[test]
    fn test_first_between_is_exclusive() {
        let m = MatchingIndices::from(vec![10, 20, 30]);
        assert_eq!(m.first_between(10, 30), Some(20));
        assert_eq!(m.first_between(9, 30), Some(10));
        assert_eq!(m.first_between(20, 30), None);
        assert_eq!(m.first_between(30, 100), None);
    }

    #[test]
    fn test_last_before() {
        let m = MatchingIndices::from(vec![10, 20]);
        assert_eq!(m.last_before(10), None);
        assert_eq!(m.last_before(11), Some(10));
        assert_eq!(m.last_before(500), Some(20));
    }

    #[test]
    fn test_push_keeps_order() {
        let mut m = MatchingIndices::new();
        m.push(4);
        m.push(9);
        m.push(2);
        m.push(9);
        assert_eq!(m.as_slice(), &[4, 9]);
    }
}
