//! Settings parser for .logpeek/config.toml

use super::types::Settings;
use logpeek_core::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const LOGPEEK_DIR: &str = ".logpeek";

const DEFAULT_CONFIG: &str = r#"# logpeek configuration

[view]
expand_step = 10          # Lines revealed by --expand GAP_ID without a mode
buffer_rows = 10          # Context rows printed around an --at/--rows window
show_gap_markers = true   # Print "N hidden lines" markers

[search]
case_sensitive = false
"#;

/// Path of the settings file inside `base_dir`
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(LOGPEEK_DIR).join(CONFIG_FILENAME)
}

/// Load settings from .logpeek/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(base_dir: &Path) -> Settings {
    let config_path = config_path(base_dir);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Load settings, failing if the file is missing or invalid
///
/// Used when the user names a config directory explicitly.
pub fn load_settings_strict(base_dir: &Path) -> Result<Settings> {
    let config_path = config_path(base_dir);
    if !config_path.exists() {
        return Err(Error::ConfigNotFound { path: config_path });
    }
    let content = std::fs::read_to_string(&config_path)?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", config_path.display(), e)))
}

/// Write the commented default config into `base_dir/.logpeek/`
///
/// Returns `false` when a config file already exists; it is never
/// overwritten.
pub fn init_config_dir(base_dir: &Path) -> Result<bool> {
    let path = config_path(base_dir);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            debug!("Keeping existing config at {:?}", path);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(DEFAULT_CONFIG.as_bytes())?;

    info!("Created default config at {:?}", path);
    Ok(true)
}
