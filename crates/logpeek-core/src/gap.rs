//! Gap metadata: hidden runs of lines next to a displayed line.
//!
//! A gap is addressed by the displayed line it is attached to (the anchor)
//! and a direction. Gap sizes are always recomputed from the displayed
//! neighbors, so `gap_size` and `remaining_gap` never diverge.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::Error;

static GAP_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(up|down)-(\d+)$").expect("Invalid gap id regex"));

/// Side of the anchor line on which the hidden run sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapDirection {
    Up,
    Down,
}

impl GapDirection {
    pub fn prefix(&self) -> &'static str {
        match self {
            GapDirection::Up => "up",
            GapDirection::Down => "down",
        }
    }
}

/// Identifier of a gap: direction plus anchor line index
///
/// Renders as `up-157` / `down-76`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GapId {
    pub direction: GapDirection,
    pub anchor: usize,
}

impl GapId {
    pub fn up(anchor: usize) -> Self {
        Self {
            direction: GapDirection::Up,
            anchor,
        }
    }

    pub fn down(anchor: usize) -> Self {
        Self {
            direction: GapDirection::Down,
            anchor,
        }
    }

    /// Parse `up-<n>` / `down-<n>`; anything else is `None`
    pub fn parse(s: &str) -> Option<Self> {
        let caps = GAP_ID_REGEX.captures(s)?;
        let anchor = caps[2].parse().ok()?;
        let direction = match &caps[1] {
            "up" => GapDirection::Up,
            _ => GapDirection::Down,
        };
        Some(Self { direction, anchor })
    }
}

impl fmt::Display for GapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.direction.prefix(), self.anchor)
    }
}

impl FromStr for GapId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::invalid_gap_id(s))
    }
}

impl Serialize for GapId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Hidden-line affordance attached to one side of a displayed line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapInfo {
    pub gap_id: GapId,
    pub gap_size: usize,
    pub remaining_gap: usize,
    /// The gap runs up to the first line of the file
    pub is_first: bool,
    /// The gap runs down to the last line of the file
    pub is_last: bool,
}

/// Gaps on both sides of one displayed line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineGaps {
    pub up: Option<GapInfo>,
    pub down: Option<GapInfo>,
}

/// Gap arithmetic for `current` given its displayed neighbors.
///
/// Shared by the display list builder and [`get_gap_info_for_line`] so a
/// point lookup always agrees with a full rebuild.
pub(crate) fn line_gaps(
    prev: Option<usize>,
    current: usize,
    next: Option<usize>,
    total_lines: usize,
) -> LineGaps {
    let above = match prev {
        Some(prev) => current.saturating_sub(prev + 1),
        None => current,
    };
    let below = match next {
        Some(next) => next.saturating_sub(current + 1),
        None => total_lines.saturating_sub(current + 1),
    };

    LineGaps {
        up: (above > 0).then(|| GapInfo {
            gap_id: GapId::up(current),
            gap_size: above,
            remaining_gap: above,
            is_first: prev.is_none(),
            is_last: false,
        }),
        down: (below > 0).then(|| GapInfo {
            gap_id: GapId::down(current),
            gap_size: below,
            remaining_gap: below,
            is_first: false,
            is_last: next.is_none(),
        }),
    }
}

/// Recompute the gaps around a single displayed line.
///
/// `displayed_indices` must be sorted ascending (as produced by the display
/// list builder). A line that is not displayed has no gaps.
pub fn get_gap_info_for_line(
    line_index: usize,
    displayed_indices: &[usize],
    total_lines: usize,
) -> LineGaps {
    let Ok(pos) = displayed_indices.binary_search(&line_index) else {
        return LineGaps::default();
    };
    let prev = pos.checked_sub(1).map(|p| displayed_indices[p]);
    let next = displayed_indices.get(pos + 1).copied();
    line_gaps(prev, line_index, next, total_lines)
}
