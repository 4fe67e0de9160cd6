//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
pub const APP_NAME: &str = "Courier TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Title shown for tabs without a usable URL
pub const DEFAULT_TITLE: &str = "Untitled";

/// Maximum number of characters kept when a title falls back to raw text
pub const TITLE_MAX_CHARS: usize = 20;

/// Header row seeded into every fresh tab
pub const DEFAULT_HEADER: (&str, &str) = ("Content-Type", "application/json");

/// Log file written next to the working directory
pub const LOG_FILE_NAME: &str = "courier.log";

/// How long the UI loop waits for a terminal event before redrawing
pub const UI_POLL_INTERVAL_MS: u64 = 50;
