//! Display list output - text with gap markers, or NDJSON rows.
//!
//! # JSON Row Format
//!
//! ```json
//! {"row":"gap","gap_id":"up-76","hidden":76,"is_first":true,"is_last":false}
//! {"row":"line","line":77,"index":76,"level":"error","text":"..."}
//! ```

use std::io::{self, Write};

use logpeek_core::{DisplayItem, GapInfo, LogLevel, LogLine};
use serde::Serialize;

/// One output row in JSON mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum OutputRow<'a> {
    /// A run of hidden lines
    Gap {
        gap_id: String,
        hidden: usize,
        is_first: bool,
        is_last: bool,
    },
    /// A displayed line
    Line {
        /// 1-based line number
        line: usize,
        index: usize,
        level: Option<LogLevel>,
        text: &'a str,
    },
}

impl OutputRow<'_> {
    fn gap(info: &GapInfo) -> Self {
        OutputRow::Gap {
            gap_id: info.gap_id.to_string(),
            hidden: info.remaining_gap,
            is_first: info.is_first,
            is_last: info.is_last,
        }
    }
}

/// Flatten display items (a whole list or a viewport window) into rows
///
/// A gap between two displayed lines is attached to both of them (as the
/// upper line's `gap_below` and the lower line's `gap_above`); it is
/// emitted once, using the `down-` id of the upper line. Only the first
/// item's `gap_above` is emitted as an `up-` gap.
pub fn rows<'a>(items: &'a [DisplayItem<'_, LogLine>]) -> Vec<OutputRow<'a>> {
    let mut rows = Vec::with_capacity(items.len() * 2);
    for (pos, item) in items.iter().enumerate() {
        if pos == 0 {
            if let Some(gap) = &item.gap_above {
                rows.push(OutputRow::gap(gap));
            }
        }
        rows.push(OutputRow::Line {
            line: item.line.line_number(),
            index: item.index,
            level: item.line.level,
            text: &item.line.text,
        });
        if let Some(gap) = &item.gap_below {
            rows.push(OutputRow::gap(gap));
        }
    }
    rows
}

/// Write rows as text
///
/// Gap markers are skipped when `show_gap_markers` is false.
pub fn write_text<W: Write>(
    out: &mut W,
    items: &[DisplayItem<'_, LogLine>],
    show_gap_markers: bool,
) -> io::Result<()> {
    let width = items
        .last()
        .map(|item| item.line.line_number().to_string().len())
        .unwrap_or(1);

    for row in rows(items) {
        match row {
            OutputRow::Gap { gap_id, hidden, .. } => {
                if show_gap_markers {
                    let noun = if hidden == 1 { "line" } else { "lines" };
                    writeln!(out, "{:>width$} ··· {hidden} hidden {noun} ({gap_id}) ···", "")?;
                }
            }
            OutputRow::Line { line, text, .. } => {
                writeln!(out, "{line:>width$} │ {text}")?;
            }
        }
    }
    Ok(())
}

/// Write rows as NDJSON
pub fn write_json<W: Write>(out: &mut W, items: &[DisplayItem<'_, LogLine>]) -> io::Result<()> {
    for row in rows(items) {
        serde_json::to_writer(&mut *out, &row)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
