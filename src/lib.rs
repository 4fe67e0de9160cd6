//! # Courier TUI
//!
//! A multi-tab terminal REST client. Every tab is an independent
//! request/response context.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS
//! - Tabs: create, activate, duplicate, rename, close
//! - Per-tab headers (duplicates allowed) and request body
//! - Response status, timing, size, headers and pretty-printed JSON
//! - Concurrent in-flight requests across tabs
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (tab registry + command handlers)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Header, HttpMethod, RequestState, ResponseOutcome, ResponseView, TabId};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, TabRegistry};
pub use network::NetworkActor;
