//! Network messages - communication between App and Network layers

use crate::models::{RequestState, ResponseOutcome, TabId};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute one HTTP exchange on behalf of a tab
    Execute {
        tab_id: TabId,
        request_id: u64,
        request: RequestState,
    },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Exactly one per dispatched `Execute`, success or failure alike
    Completed {
        tab_id: TabId,
        request_id: u64,
        outcome: ResponseOutcome,
    },
}
