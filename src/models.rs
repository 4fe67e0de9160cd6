use std::fmt;

use crate::constants::DEFAULT_HEADER;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::HEAD,
            HttpMethod::HEAD => HttpMethod::OPTIONS,
            HttpMethod::OPTIONS => HttpMethod::GET,
        }
    }

    /// GET and HEAD never carry a request body
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::GET | HttpMethod::HEAD)
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::HEAD => reqwest::Method::HEAD,
            HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP Header row. Keys are not unique; empty keys are never sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A blank editable row
    pub fn blank() -> Self {
        Header::default()
    }
}

/// Request configuration owned by a single tab
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestState {
    pub method: HttpMethod,
    pub url: String,
    pub body: String,
    pub headers: Vec<Header>,
}

impl Default for RequestState {
    fn default() -> Self {
        RequestState {
            method: HttpMethod::GET,
            url: String::new(),
            body: String::new(),
            headers: vec![Header::new(DEFAULT_HEADER.0, DEFAULT_HEADER.1)],
        }
    }
}

/// Opaque tab identifier, never reused within a registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub(crate) u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// A completed exchange
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuccessResponse {
    pub status_code: u16,
    pub status_text: String,
    pub ok: bool,
    pub elapsed_ms: u64,
    pub size_bytes: usize,
    pub headers: Vec<(String, String)>,
    pub body_raw: String,
    /// Two-space indented rendering when the body is valid JSON
    pub body_pretty: Option<String>,
}

/// Classified result of one request/response cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseOutcome {
    Success(SuccessResponse),
    Failure { error_message: String },
}

impl ResponseOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        ResponseOutcome::Failure {
            error_message: message.into(),
        }
    }

    /// Failures always report zero elapsed time
    pub fn elapsed_ms(&self) -> u64 {
        match self {
            ResponseOutcome::Success(resp) => resp.elapsed_ms,
            ResponseOutcome::Failure { .. } => 0,
        }
    }

    /// Failures always report zero size
    pub fn size_bytes(&self) -> usize {
        match self {
            ResponseOutcome::Success(resp) => resp.size_bytes,
            ResponseOutcome::Failure { .. } => 0,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ResponseOutcome::Failure { .. })
    }
}

/// What a tab's response area currently shows
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResponseView {
    #[default]
    Empty,
    Pending,
    Ready(ResponseOutcome),
}
