//! Command-line argument types

use std::path::PathBuf;

use clap::Parser;
use logpeek_core::prelude::*;
use logpeek_core::{Boundary, ExpandMode, ExpansionRequest, GapId, LevelFilter};

/// logpeek - filter large log files and peek into the hidden lines
#[derive(Parser, Debug)]
#[command(name = "logpeek")]
#[command(about = "Filter large log files and peek into the hidden lines", long_about = None)]
pub struct Args {
    /// Log file to open
    #[arg(value_name = "FILE", required_unless_present = "init_config")]
    pub file: Option<PathBuf>,

    /// Filter query (regular expression)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Level filter: all, errors, warnings, info, debug
    #[arg(short, long, default_value = "all")]
    pub level: LevelFilter,

    /// Expand a gap, applied in order: GAP_ID[:MODE][@START..END]
    ///
    /// MODE is a line count, all, next-match or prev-match (default: the
    /// configured step). START..END is the span of the neighboring unit,
    /// used by next-match and prev-match.
    #[arg(short, long = "expand", value_name = "GAP_ID[:MODE][@START..END]")]
    pub expand: Vec<String>,

    /// Start the printed window at this line (1-based)
    #[arg(long, value_name = "LINE")]
    pub at: Option<usize>,

    /// Print at most this many rows, plus the configured buffer rows
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Directory containing .logpeek/config.toml (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Write a default .logpeek/config.toml (kept if one exists)
    #[arg(long)]
    pub init_config: bool,

    /// Print one JSON object per row instead of text
    #[arg(long)]
    pub json: bool,
}

/// Parse a `GAP_ID[:MODE][@START..END]` argument
///
/// Unlike the UI path, a malformed gap id typed on the command line is
/// reported instead of being ignored. A boundary belongs to its own
/// request and is only accepted with `prev-match` or `next-match`.
pub fn parse_expansion(arg: &str, default_step: usize) -> Result<ExpansionRequest> {
    let (spec, boundary) = match arg.split_once('@') {
        Some((spec, boundary)) => (spec, Some(boundary.parse::<Boundary>()?)),
        None => (arg, None),
    };
    let (gap_id, mode) = match spec.split_once(':') {
        Some((gap_id, mode)) => (gap_id, mode.parse::<ExpandMode>()?),
        None => (spec, ExpandMode::Count(default_step)),
    };
    let gap_id: GapId = gap_id.parse()?;

    let mut request = ExpansionRequest::new(gap_id.to_string(), mode);
    match (mode, boundary) {
        (_, None) => {}
        (ExpandMode::PrevMatch, Some(boundary)) => request.prev_boundary = Some(boundary),
        (ExpandMode::NextMatch, Some(boundary)) => request.next_boundary = Some(boundary),
        (mode, Some(_)) => {
            return Err(Error::invalid_request(format!(
                "'{arg}': a boundary needs prev-match or next-match, not {mode}"
            )));
        }
    }
    Ok(request)
}

impl Args {
    /// Expansion requests in command-line order
    pub fn expansion_requests(&self, default_step: usize) -> Result<Vec<ExpansionRequest>> {
        self.expand
            .iter()
            .map(|arg| parse_expansion(arg, default_step))
            .collect()
    }

    /// Whether only part of the display list is printed
    pub fn has_window(&self) -> bool {
        self.at.is_some() || self.rows.is_some()
    }
}
