//! Gap expansion: turn a user "show more" request into new forced ranges.
//!
//! Every request has a safe interpretation. Malformed gap ids, stale
//! anchors and zero-yield modes return the current [`ForcedRanges`]
//! instance unchanged, which callers detect with [`ForcedRanges::ptr_eq`]
//! to skip re-rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gap::{GapDirection, GapId};
use crate::matching::MatchingIndices;
use crate::range::{merge_ranges, normalize_range, ForcedRange, ForcedRanges};

/// How much of a gap to reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// Reveal up to `n` lines adjacent to the anchor
    Count(usize),
    /// Reveal the whole gap
    All,
    /// Reveal down to the next boundary or match (down gaps)
    NextMatch,
    /// Reveal up to the previous boundary or match (up gaps)
    PrevMatch,
}

impl fmt::Display for ExpandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandMode::Count(n) => write!(f, "{n}"),
            ExpandMode::All => write!(f, "all"),
            ExpandMode::NextMatch => write!(f, "next-match"),
            ExpandMode::PrevMatch => write!(f, "prev-match"),
        }
    }
}

impl FromStr for ExpandMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ExpandMode::All),
            "next-match" => Ok(ExpandMode::NextMatch),
            "prev-match" => Ok(ExpandMode::PrevMatch),
            other => other
                .parse()
                .map(ExpandMode::Count)
                .map_err(|_| Error::invalid_expand_mode(other)),
        }
    }
}

/// Span of an adjacent semantic unit (e.g. one request's log lines),
/// half-open like a forced range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    pub start: usize,
    pub end: usize,
}

impl Boundary {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl FromStr for Boundary {
    type Err = Error;

    /// Parse `start..end`
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| Error::invalid_request(format!("boundary '{s}' is not start..end")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| Error::invalid_request(format!("boundary '{s}' is not start..end")))
        };
        let boundary = Boundary::new(parse(start)?, parse(end)?);
        if boundary.end < boundary.start {
            return Err(Error::invalid_request(format!(
                "boundary '{s}' ends before it starts"
            )));
        }
        Ok(boundary)
    }
}

/// A single expansion action from a gap affordance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRequest {
    /// Raw gap id as carried by the UI (`up-157`, `down-76`)
    pub gap_id: String,
    pub mode: ExpandMode,
    pub prev_boundary: Option<Boundary>,
    pub next_boundary: Option<Boundary>,
}

impl ExpansionRequest {
    pub fn new(gap_id: impl Into<String>, mode: ExpandMode) -> Self {
        Self {
            gap_id: gap_id.into(),
            mode,
            prev_boundary: None,
            next_boundary: None,
        }
    }

    pub fn with_prev_boundary(mut self, boundary: Boundary) -> Self {
        self.prev_boundary = Some(boundary);
        self
    }

    pub fn with_next_boundary(mut self, boundary: Boundary) -> Self {
        self.next_boundary = Some(boundary);
        self
    }
}

/// Apply an expansion request to the current forced ranges.
///
/// `displayed_indices` is the sorted index array of the current display
/// list. `matching` feeds the `next-match`/`prev-match` fallbacks when no
/// boundary hint applies.
///
/// Returns the `current` instance itself whenever the request changes
/// nothing; otherwise a freshly merged collection whose coverage is a
/// superset of `current`.
pub fn calculate_gap_expansion(
    request: &ExpansionRequest,
    displayed_indices: &[usize],
    total_lines: usize,
    current: &ForcedRanges,
    matching: Option<&MatchingIndices>,
) -> ForcedRanges {
    let Some(gap_id) = GapId::parse(&request.gap_id) else {
        tracing::debug!("Ignoring expansion with malformed gap id {:?}", request.gap_id);
        return current.clone();
    };
    let anchor = gap_id.anchor;

    let Ok(pos) = displayed_indices.binary_search(&anchor) else {
        tracing::debug!("Ignoring expansion of {}: anchor not displayed", gap_id);
        return current.clone();
    };
    let prev = pos.checked_sub(1).map(|p| displayed_indices[p]);
    let next = displayed_indices.get(pos + 1).copied();

    // Hidden run as a half-open range of line indices
    let hidden = match gap_id.direction {
        GapDirection::Up => prev.map_or(0, |p| p + 1)..anchor,
        GapDirection::Down => anchor + 1..next.unwrap_or(total_lines),
    };
    let total_gap = hidden.end.saturating_sub(hidden.start);
    if total_gap == 0 {
        tracing::trace!("Ignoring expansion of {}: no hidden lines", gap_id);
        return current.clone();
    }

    let whole_gap = ForcedRange::from(hidden.clone());
    let new_range = match (request.mode, gap_id.direction) {
        (ExpandMode::Count(n), direction) => {
            let n = n.min(total_gap);
            if n == 0 {
                return current.clone();
            }
            match direction {
                GapDirection::Up => ForcedRange::new(anchor - n, anchor),
                GapDirection::Down => ForcedRange::new(anchor + 1, anchor + 1 + n),
            }
        }
        (ExpandMode::NextMatch, GapDirection::Down) => {
            let boundary = request
                .next_boundary
                .map(|b| b.start)
                .filter(|&start| anchor < start && start <= hidden.end);
            let target =
                boundary.or_else(|| matching.and_then(|m| m.first_between(anchor, hidden.end)));
            match target {
                Some(target) => ForcedRange::new(anchor + 1, target + 1),
                None => whole_gap,
            }
        }
        (ExpandMode::PrevMatch, GapDirection::Up) => {
            let lower = prev.unwrap_or(0);
            let boundary = request
                .prev_boundary
                .map(|b| b.end)
                .filter(|&end| lower <= end && end < anchor);
            let target = boundary.or_else(|| {
                matching
                    .and_then(|m| m.last_before(anchor))
                    .filter(|&i| prev.is_none_or(|p| i > p))
            });
            match target {
                Some(target) => ForcedRange::new(target, anchor),
                None => whole_gap,
            }
        }
        // All, or a match mode pointed the wrong way
        _ => whole_gap,
    };

    let Some(new_range) = normalize_range(new_range, total_lines) else {
        return current.clone();
    };

    let merged = merge_ranges(current.iter().copied().chain(std::iter::once(new_range)));
    if merged.as_slice() == current.as_slice() {
        tracing::trace!("Expansion of {} already covered by {:?}", gap_id, current);
        return current.clone();
    }

    tracing::debug!(
        "Expanded {} ({}) with {}: {} -> {} forced ranges",
        gap_id,
        request.mode,
        new_range,
        current.len(),
        merged.len()
    );
    ForcedRanges::from_merged(merged)
}
