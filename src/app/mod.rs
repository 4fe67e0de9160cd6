//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates the tab registry, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod panel;
pub mod registry;

pub use state::AppState;
pub use actor::AppActor;
pub use panel::TabPanel;
pub use registry::{Tab, TabRegistry};
