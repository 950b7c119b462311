//! # logpeek-core - Display Range Reconciliation
//!
//! Foundation crate for logpeek. Decides which log lines a filtered,
//! virtualized view renders, and how the hidden runs between them can be
//! "peeked" into.
//!
//! This crate has **zero internal dependencies** and performs no I/O in its
//! reconciliation functions: they are pure value-in/value-out.
//!
//! ## Public API
//!
//! ### Range Merger (`range`)
//! - [`ForcedRange`] - Half-open interval of always-visible lines
//! - [`ForcedRanges`] - Shared merged collection with identity comparison
//! - [`normalize_range()`], [`merge_ranges()`]
//!
//! ### Display List Builder (`display`)
//! - [`build_display_items()`] - Matches plus forced ranges, with gap metadata
//! - [`DisplayItem`], [`DisplayList`]
//!
//! ### Gap Expansion (`expansion`)
//! - [`calculate_gap_expansion()`] - Apply an [`ExpansionRequest`]
//! - [`ExpandMode`], [`Boundary`]
//!
//! ### Gap Lookup (`gap`)
//! - [`get_gap_info_for_line()`] - Gaps around one displayed line
//! - [`GapId`], [`GapInfo`], [`LineGaps`]
//!
//! ### Domain Types (`types`)
//! - [`LogLine`], [`LogLevel`], [`LevelFilter`]
//!
//! ### Error Handling (`error`)
//! - [`Error`], [`Result`], [`ResultExt`]
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use logpeek_core::prelude::*;
//! ```

pub mod display;
pub mod error;
pub mod expansion;
pub mod gap;
pub mod logging;
pub mod matching;
pub mod prelude;
pub mod range;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use display::{build_display_items, display_indices, items_for_indices, DisplayItem, DisplayList};
pub use error::{Error, Result, ResultExt};
pub use expansion::{calculate_gap_expansion, Boundary, ExpandMode, ExpansionRequest};
pub use gap::{get_gap_info_for_line, GapDirection, GapId, GapInfo, LineGaps};
pub use matching::MatchingIndices;
pub use range::{merge_ranges, normalize_range, ForcedRange, ForcedRanges};
pub use types::{LevelFilter, LogLevel, LogLine};
