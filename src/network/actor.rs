//! Network actor - runs HTTP exchanges in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{RequestState, ResponseOutcome, TabId};
use crate::network::client::{create_client, execute};

/// Reports completion of one request exactly once.
///
/// If the task is dropped before an outcome is recorded (abort or panic) a
/// failure is reported instead, so the owning tab always leaves its pending
/// state.
struct CompletionGuard {
    tab_id: TabId,
    request_id: u64,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    outcome: Option<ResponseOutcome>,
}

impl CompletionGuard {
    fn new(
        tab_id: TabId,
        request_id: u64,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        CompletionGuard {
            tab_id,
            request_id,
            response_tx,
            outcome: None,
        }
    }

    fn complete(mut self, outcome: ResponseOutcome) {
        self.outcome = Some(outcome);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let outcome = self.outcome.take().unwrap_or_else(|| {
            tracing::warn!(
                tab = %self.tab_id,
                id = self.request_id,
                "Request task ended without an outcome"
            );
            ResponseOutcome::failure("Request aborted")
        });
        let _ = self.response_tx.send(NetworkResponse::Completed {
            tab_id: self.tab_id,
            request_id: self.request_id,
            outcome,
        });
    }
}

/// Network actor that processes HTTP request commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { tab_id, request_id, request }) => {
                            self.spawn_exchange(tab_id, request_id, request);
                        }
                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Reap finished tasks; outcomes are reported by the guard
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "Request task failed");
                    }
                }
            }
        }

        // In-flight requests are never cancelled; let them finish
        while self.active_requests.join_next().await.is_some() {}
    }

    fn spawn_exchange(&mut self, tab_id: TabId, request_id: u64, request: RequestState) {
        let client = self.client.clone();
        let guard = CompletionGuard::new(tab_id, request_id, self.response_tx.clone());

        self.active_requests.spawn(async move {
            tracing::info!(
                tab = %tab_id,
                id = request_id,
                url = %request.url,
                method = %request.method,
                "Executing request"
            );
            let outcome = execute(
                &client,
                request.method,
                &request.url,
                &request.headers,
                Some(request.body.as_str()),
            )
            .await;
            tracing::info!(
                tab = %tab_id,
                id = request_id,
                failed = outcome.is_failure(),
                elapsed_ms = outcome.elapsed_ms(),
                "Request completed"
            );
            guard.complete(outcome);
        });
    }
}
