//! logpeek - filter large log files and peek into the hidden lines
//!
//! Binary entry point. State and reconciliation live in the workspace crates.

mod cli;
mod render;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use logpeek_app::config::{config_path, init_config_dir, load_settings, load_settings_strict};
use logpeek_app::{read_log_file, PeekState, Settings, ViewportState};
use logpeek_core::{logging, DisplayList, LogLine};

use crate::cli::Args;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: file logging disabled: {e}");
    }

    let config_dir = args
        .config
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init_config {
        let path = config_path(&config_dir);
        if init_config_dir(&config_dir)? {
            eprintln!("Created {}", path.display());
        } else {
            eprintln!("Keeping existing {}", path.display());
        }
    }
    let Some(file) = &args.file else {
        return Ok(());
    };

    // An explicitly named config directory must hold a valid file
    let settings = if args.config.is_some() {
        load_settings_strict(&config_dir)?
    } else {
        load_settings(&config_dir)
    };

    let lines =
        read_log_file(file).wrap_err_with(|| format!("failed to open {}", file.display()))?;
    let mut state = PeekState::with_lines(lines, &settings);

    if let Some(query) = &args.query {
        state.set_query(query)?;
    }
    state.set_level_filter(args.level);

    for request in args.expansion_requests(settings.view.expand_step)? {
        if !state.expand(&request) {
            tracing::info!("Expansion {} {} changed nothing", request.gap_id, request.mode);
        }
    }

    let list = state.display();
    tracing::info!(
        "Rendering {} of {} lines ({} hidden) for query {:?}, {}",
        list.len(),
        state.total_lines(),
        list.hidden_count(state.total_lines()),
        state.filter().query(),
        state.filter().level().display_name()
    );

    let viewport = args.has_window().then(|| viewport_for(&args, &settings, &list));
    let items = match &viewport {
        Some(viewport) => viewport.window(&list),
        None => &list.items[..],
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.json {
        render::write_json(&mut out, items)?;
    } else {
        render::write_text(&mut out, items, settings.view.show_gap_markers)?;
    }
    out.flush()?;

    Ok(())
}

/// Viewport for `--at` / `--rows`; without `--rows` it runs to the end
fn viewport_for(args: &Args, settings: &Settings, list: &DisplayList<'_, LogLine>) -> ViewportState {
    let line_index = args.at.map_or(0, |line| line.saturating_sub(1));
    let rows = args
        .rows
        .unwrap_or_else(|| list.len() - list.row_at_or_after(line_index));

    let mut viewport = ViewportState::new().with_buffer_rows(settings.view.buffer_rows);
    viewport.update_content_size(list.len(), rows);
    viewport.jump_to_line(list, line_index);
    viewport
}
