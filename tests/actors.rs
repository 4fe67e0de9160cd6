use std::time::Duration;

use courier_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use courier_tui::models::{ResponseOutcome, ResponseView};
use courier_tui::{AppActor, NetworkActor};
use tokio::sync::mpsc;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: mpsc::UnboundedReceiver<RenderState>,
}

impl Harness {
    fn spawn() -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
        let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
        let (render_tx, render_rx) = mpsc::unbounded_channel::<RenderState>();

        tokio::spawn(NetworkActor::new(net_resp_tx).run(net_cmd_rx));
        tokio::spawn(AppActor::new(net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

        Harness { ui_tx, render_rx }
    }

    fn send(&self, event: UiEvent) {
        self.ui_tx.send(event).unwrap();
    }

    fn type_url(&self, url: &str) {
        self.send(UiEvent::StartEditing);
        for c in url.chars() {
            self.send(UiEvent::CharInput(c));
        }
        self.send(UiEvent::StopEditing);
    }

    async fn next(&mut self) -> RenderState {
        tokio::time::timeout(Duration::from_secs(5), self.render_rx.recv())
            .await
            .expect("render state in time")
            .expect("app actor running")
    }

    async fn wait_for(&mut self, pred: impl Fn(&RenderState) -> bool) -> RenderState {
        loop {
            let state = self.next().await;
            if pred(&state) {
                return state;
            }
        }
    }
}

async fn delayed_server(delay_ms: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"ok":true}"#)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn send_flows_through_both_actors() {
    let server = delayed_server(0).await;
    let mut harness = Harness::spawn();
    let initial = harness.next().await;
    assert_eq!(initial.tabs.len(), 1);
    assert_eq!(initial.tabs[0].title, "Untitled");

    harness.type_url(&server.uri());
    harness.send(UiEvent::SendRequest);

    let pending = harness.wait_for(|s| s.is_loading).await;
    assert_eq!(pending.response, ResponseView::Pending);
    assert_eq!(pending.tabs[0].title, "127.0.0.1");

    let done = harness.wait_for(|s| matches!(s.response, ResponseView::Ready(_))).await;
    assert!(!done.is_loading);
    match done.response {
        ResponseView::Ready(ResponseOutcome::Success(resp)) => {
            assert_eq!(resp.status_code, 200);
            assert_eq!(resp.body_pretty.as_deref(), Some("{\n  \"ok\": true\n}"));
        }
        other => panic!("unexpected response view: {:?}", other),
    }
}

#[tokio::test]
async fn empty_url_never_reaches_the_network() {
    let server = delayed_server(0).await;
    let mut harness = Harness::spawn();
    harness.next().await;

    harness.send(UiEvent::SendRequest);
    let state = harness.next().await;
    assert!(!state.is_loading);
    assert_eq!(state.response, ResponseView::Empty);
    assert!(state.notice.is_some());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn tabs_have_independent_in_flight_requests() {
    let server = delayed_server(300).await;
    let mut harness = Harness::spawn();
    harness.next().await;

    harness.type_url(&server.uri());
    harness.send(UiEvent::SendRequest);
    harness.send(UiEvent::NewTab);
    harness.type_url(&server.uri());
    harness.send(UiEvent::SendRequest);

    let both = harness
        .wait_for(|s| s.tabs.len() == 2 && s.tabs.iter().all(|t| t.is_loading))
        .await;
    assert!(both.tabs[1].is_active);

    let done = harness
        .wait_for(|s| s.tabs.iter().all(|t| !t.is_loading))
        .await;
    assert!(matches!(done.response, ResponseView::Ready(ResponseOutcome::Success(_))));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn closing_a_tab_discards_its_late_result() {
    let server = delayed_server(300).await;
    let mut harness = Harness::spawn();
    let initial = harness.next().await;
    let doomed = initial.active_tab;

    harness.type_url(&server.uri());
    harness.send(UiEvent::SendRequest);
    harness.wait_for(|s| s.is_loading).await;

    harness.send(UiEvent::CloseTab(doomed));
    let after_close = harness.wait_for(|s| s.active_tab != doomed).await;
    assert_eq!(after_close.tabs.len(), 1);
    assert_eq!(after_close.response, ResponseView::Empty);

    // The next render is triggered by the late network completion
    let after_result = harness.next().await;
    assert_eq!(after_result.tabs.len(), 1);
    assert_eq!(after_result.active_tab, after_close.active_tab);
    assert_eq!(after_result.response, ResponseView::Empty);
    assert!(!after_result.is_loading);
}

#[tokio::test]
async fn duplicate_copies_the_edited_request() {
    let mut harness = Harness::spawn();
    let initial = harness.next().await;

    harness.type_url("https://example.com/api/orders?page=3");
    harness.send(UiEvent::CycleMethod);
    harness.send(UiEvent::DuplicateTab(initial.active_tab));

    let copy = harness.wait_for(|s| s.tabs.len() == 2).await;
    assert_ne!(copy.active_tab, initial.active_tab);
    assert_eq!(copy.tabs[1].title, "orders");
    assert_eq!(copy.url, "https://example.com/api/orders?page=3");
    assert_eq!(copy.method.as_str(), "POST");
    assert_eq!(copy.headers, initial.headers);
}

#[tokio::test]
async fn send_without_network_layer_does_not_leave_tab_pending() {
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (_net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, render_rx) = mpsc::unbounded_channel::<RenderState>();
    drop(net_cmd_rx);
    tokio::spawn(AppActor::new(net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

    let mut harness = Harness { ui_tx, render_rx };
    harness.next().await;
    harness.type_url("http://x.test");
    harness.send(UiEvent::SendRequest);

    let state = harness
        .wait_for(|s| matches!(s.response, ResponseView::Ready(_)))
        .await;
    assert!(!state.is_loading);
    assert!(state.tabs.iter().all(|t| !t.is_loading));
    assert_eq!(
        state.response,
        ResponseView::Ready(ResponseOutcome::failure("Network layer unavailable"))
    );

    // The lock is released, so the tab can send again
    harness.send(UiEvent::SendRequest);
    let retry = harness
        .wait_for(|s| matches!(s.response, ResponseView::Ready(_)))
        .await;
    assert!(!retry.is_loading);
}
