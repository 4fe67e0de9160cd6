//! HTTP client wrapper - executes requests and classifies the outcome

use std::time::Instant;

use crate::constants::USER_AGENT;
use crate::models::{Header, HttpMethod, ResponseOutcome, SuccessResponse};

/// Build a request from the given parameters
fn build_request(
    client: &reqwest::Client,
    method: HttpMethod,
    url: &str,
    headers: &[Header],
    body: Option<&str>,
) -> reqwest::RequestBuilder {
    let mut req_builder = client.request(method.to_reqwest(), url);

    // `header` appends, so repeated keys go out as separate lines
    for header in headers.iter().filter(|h| !h.key.is_empty()) {
        req_builder = req_builder.header(header.key.as_str(), header.value.as_str());
    }

    if let Some(body) = body.filter(|b| method.allows_body() && !b.is_empty()) {
        req_builder = req_builder.body(body.to_string());
    }

    req_builder
}

/// Execute one HTTP exchange. Never fails: transport errors become a
/// [`ResponseOutcome::Failure`].
pub async fn execute(
    client: &reqwest::Client,
    method: HttpMethod,
    url: &str,
    headers: &[Header],
    body: Option<&str>,
) -> ResponseOutcome {
    let req_builder = build_request(client, method, url, headers, body);

    let start = Instant::now();
    let resp = match req_builder.send().await {
        Ok(resp) => resp,
        Err(e) => return ResponseOutcome::failure(describe_error(&e)),
    };

    let status = resp.status();
    let response_headers: Vec<(String, String)> = resp
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let body_raw = match resp.text().await {
        Ok(text) => text,
        Err(e) => return ResponseOutcome::failure(format!("Error reading body: {}", e)),
    };
    let elapsed_ms = start.elapsed().as_millis() as u64;

    ResponseOutcome::Success(SuccessResponse {
        status_code: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        ok: status.is_success(),
        elapsed_ms,
        size_bytes: body_raw.len(),
        headers: response_headers,
        body_pretty: pretty_json(&body_raw),
        body_raw,
    })
}

/// Strict JSON parse; on success returns a two-space indented rendering
pub fn pretty_json(raw: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(raw).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_builder() {
        format!("Invalid request: {}", e)
    } else if e.is_timeout() {
        format!("Request timed out: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Create an HTTP client with default configuration.
///
/// No timeout is configured; requests run until the transport gives up.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}
