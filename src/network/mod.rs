//! Network layer - HTTP request execution
//!
//! The Network actor receives exchange commands and sends back one
//! completion per request.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
