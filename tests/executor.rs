use courier_tui::models::{Header, HttpMethod, ResponseOutcome};
use courier_tui::network::client::{create_client, execute};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn expect_success(outcome: ResponseOutcome) -> courier_tui::models::SuccessResponse {
    match outcome {
        ResponseOutcome::Success(resp) => resp,
        ResponseOutcome::Failure { error_message } => {
            panic!("unexpected failure: {}", error_message)
        }
    }
}

#[tokio::test]
async fn json_response_is_classified_and_pretty_printed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-server", "mock")
                .set_body_string(r#"{"a":1}"#),
        )
        .mount(&server)
        .await;

    let client = create_client();
    let url = format!("{}/json", server.uri());
    let resp = expect_success(execute(&client, HttpMethod::GET, &url, &[], None).await);

    assert_eq!(resp.status_code, 201);
    assert_eq!(resp.status_text, "Created");
    assert!(resp.ok);
    assert_eq!(resp.size_bytes, 7);
    assert_eq!(resp.body_raw, r#"{"a":1}"#);
    assert_eq!(resp.body_pretty.as_deref(), Some("{\n  \"a\": 1\n}"));
    assert!(resp
        .headers
        .iter()
        .any(|(name, value)| name == "x-server" && value == "mock"));
}

#[tokio::test]
async fn non_json_body_is_kept_raw() {
    let server = MockServer::start().await;
    Mock::given(path("/text"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = create_client();
    let url = format!("{}/text", server.uri());
    let resp = expect_success(execute(&client, HttpMethod::GET, &url, &[], None).await);

    assert_eq!(resp.status_code, 404);
    assert!(!resp.ok);
    assert_eq!(resp.body_raw, "not json");
    assert_eq!(resp.body_pretty, None);
    assert_eq!(resp.size_bytes, 8);
}

#[tokio::test]
async fn size_counts_bytes_not_chars() {
    let server = MockServer::start().await;
    Mock::given(path("/utf8"))
        .respond_with(ResponseTemplate::new(200).set_body_string("héllo"))
        .mount(&server)
        .await;

    let client = create_client();
    let url = format!("{}/utf8", server.uri());
    let resp = expect_success(execute(&client, HttpMethod::GET, &url, &[], None).await);
    assert_eq!(resp.size_bytes, 6);
}

#[tokio::test]
async fn get_never_transmits_a_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = create_client();
    let outcome = execute(&client, HttpMethod::GET, &server.uri(), &[], Some("{\"x\":1}")).await;
    assert!(!outcome.is_failure());

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn post_transmits_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = create_client();
    let outcome = execute(&client, HttpMethod::POST, &server.uri(), &[], Some("{}")).await;
    assert!(!outcome.is_failure());

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].body, b"{}");
}

#[tokio::test]
async fn duplicate_header_keys_are_all_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let headers = vec![
        Header::new("X-Dup", "one"),
        Header::new("", "dropped"),
        Header::new("X-Dup", "two"),
        Header::new("Content-Type", "application/json"),
    ];
    let client = create_client();
    let outcome = execute(&client, HttpMethod::GET, &server.uri(), &headers, None).await;
    assert!(!outcome.is_failure());

    let received = server.received_requests().await.unwrap();
    let values: Vec<_> = received[0]
        .headers
        .get_all("x-dup")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["one", "two"]);
    assert_eq!(
        received[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn connection_failure_becomes_an_outcome() {
    // Reserve a port, then free it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = create_client();
    let url = format!("http://127.0.0.1:{}/", port);
    let outcome = execute(&client, HttpMethod::GET, &url, &[], None).await;

    assert!(outcome.is_failure());
    assert_eq!(outcome.elapsed_ms(), 0);
    assert_eq!(outcome.size_bytes(), 0);
    match outcome {
        ResponseOutcome::Failure { error_message } => assert!(!error_message.is_empty()),
        ResponseOutcome::Success(_) => unreachable!(),
    }
}

#[tokio::test]
async fn invalid_input_is_reported_not_raised() {
    let client = create_client();

    let outcome = execute(&client, HttpMethod::GET, "not a url", &[], None).await;
    assert!(outcome.is_failure());

    let bad_header = vec![Header::new("bad header", "x")];
    let outcome = execute(&client, HttpMethod::GET, "http://127.0.0.1:9/", &bad_header, None).await;
    assert!(outcome.is_failure());
}
