//! Configuration file parsing for logpeek
//!
//! Supports `.logpeek/config.toml` in the working directory or a directory
//! passed on the command line.

pub mod settings;
pub mod types;

pub use settings::{config_path, init_config_dir, load_settings, load_settings_strict};
pub use types::*;
