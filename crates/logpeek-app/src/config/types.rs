//! Configuration types for logpeek
//!
//! Defines:
//! - `Settings` - Global application settings (`.logpeek/config.toml`)
//! - `ViewSettings`, `SearchSettings` - Per-section settings

use serde::{Deserialize, Serialize};

/// Application settings (.logpeek/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub view: ViewSettings,

    #[serde(default)]
    pub search: SearchSettings,
}

/// Display list and viewport settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewSettings {
    /// Lines revealed by an expansion that names no mode
    #[serde(default = "default_expand_step")]
    pub expand_step: usize,

    /// Context rows rendered above/below a viewport window
    #[serde(default = "default_buffer_rows")]
    pub buffer_rows: usize,

    /// Print "N hidden lines" markers between displayed lines
    #[serde(default = "default_true")]
    pub show_gap_markers: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            expand_step: default_expand_step(),
            buffer_rows: default_buffer_rows(),
            show_gap_markers: true,
        }
    }
}

fn default_expand_step() -> usize {
    10
}

fn default_buffer_rows() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Filter query settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Match the query case-sensitively (default: case-insensitive)
    #[serde(default)]
    pub case_sensitive: bool,
}
