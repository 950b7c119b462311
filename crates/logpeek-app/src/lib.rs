//! logpeek-app - Application state for logpeek
//!
//! Owns the loaded lines, the active filter and the forced ranges, and
//! drives the pure reconciliation functions in `logpeek-core` from user
//! actions. Also provides settings loading and the virtualized viewport.

pub mod config;
pub mod filter;
pub mod log_file;
pub mod peek_state;
pub mod viewport_state;

// Re-export primary types
pub use config::Settings;
pub use filter::LineFilter;
pub use log_file::{parse_line, parse_lines, read_log_file};
pub use peek_state::PeekState;
pub use viewport_state::ViewportState;
