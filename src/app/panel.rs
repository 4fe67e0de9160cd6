//! Tab content panel - the editable request fields of one tab and its
//! response view.

use std::fmt;

use url::Url;

use crate::constants::{DEFAULT_TITLE, TITLE_MAX_CHARS};
use crate::models::{Header, HttpMethod, RequestState, ResponseOutcome, ResponseView};

/// Which part of the response is shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseSection {
    #[default]
    Body,
    Headers,
}

impl ResponseSection {
    pub fn toggle(&self) -> ResponseSection {
        match self {
            ResponseSection::Body => ResponseSection::Headers,
            ResponseSection::Headers => ResponseSection::Body,
        }
    }
}

/// Why a send was refused before reaching the network
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendBlocked {
    EmptyUrl,
    InFlight,
}

impl fmt::Display for SendBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendBlocked::EmptyUrl => f.write_str("Please enter a request URL."),
            SendBlocked::InFlight => f.write_str("A request is already in flight for this tab."),
        }
    }
}

/// A request accepted for dispatch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSend {
    pub request_id: u64,
    pub request: RequestState,
}

/// Editable request surface plus response view for a single tab
#[derive(Clone, Debug)]
pub struct TabPanel {
    pub method: HttpMethod,
    pub url: String,
    pub body: String,
    pub headers: Vec<Header>,
    pub selected_header: usize,
    pub response: ResponseView,
    pub response_section: ResponseSection,
    pub response_scroll: u16,
    /// Local validation message, cleared on the next edit
    pub notice: Option<String>,
    pending_request_id: Option<u64>,
    next_request_id: u64,
}

impl TabPanel {
    pub fn new(state: RequestState) -> Self {
        let mut panel = TabPanel {
            method: HttpMethod::GET,
            url: String::new(),
            body: String::new(),
            headers: Vec::new(),
            selected_header: 0,
            response: ResponseView::Empty,
            response_section: ResponseSection::Body,
            response_scroll: 0,
            notice: None,
            pending_request_id: None,
            next_request_id: 1,
        };
        panel.apply_state(state);
        panel
    }

    /// Snapshot of the live fields. Rows without a key are skipped since
    /// they are never sent.
    pub fn read_state(&self) -> RequestState {
        RequestState {
            method: self.method,
            url: self.url.clone(),
            body: self.body.clone(),
            headers: self
                .headers
                .iter()
                .filter(|h| !h.key.is_empty())
                .cloned()
                .collect(),
        }
    }

    /// Write `state` into the fields; the header list is never left empty
    pub fn apply_state(&mut self, state: RequestState) {
        self.method = state.method;
        self.url = state.url;
        self.body = state.body;
        self.headers = state.headers;
        if self.headers.is_empty() {
            self.headers.push(Header::blank());
        }
        self.selected_header = 0;
    }

    pub fn is_pending(&self) -> bool {
        self.pending_request_id.is_some()
    }

    /// Enter the pending state and hand back what should be dispatched
    pub fn begin_send(&mut self) -> Result<PendingSend, SendBlocked> {
        if self.is_pending() {
            return Err(SendBlocked::InFlight);
        }
        if self.url.is_empty() {
            self.notice = Some(SendBlocked::EmptyUrl.to_string());
            return Err(SendBlocked::EmptyUrl);
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_request_id = Some(request_id);
        self.notice = None;
        self.response = ResponseView::Pending;
        self.response_scroll = 0;

        Ok(PendingSend {
            request_id,
            request: self.read_state(),
        })
    }

    /// Release the pending state and show the outcome. Returns false when
    /// `request_id` is not the request this panel is waiting for.
    pub fn finish_send(&mut self, request_id: u64, outcome: ResponseOutcome) -> bool {
        if self.pending_request_id != Some(request_id) {
            return false;
        }
        self.pending_request_id = None;
        self.response = ResponseView::Ready(outcome);
        self.response_scroll = 0;
        true
    }

    pub fn cycle_method(&mut self) {
        self.method = self.method.next();
    }

    pub fn add_header_row(&mut self) {
        self.headers.push(Header::blank());
        self.selected_header = self.headers.len() - 1;
    }

    pub fn remove_header_row(&mut self, index: usize) {
        if index < self.headers.len() {
            self.headers.remove(index);
            if self.selected_header >= self.headers.len() {
                self.selected_header = self.headers.len().saturating_sub(1);
            }
        }
    }

    pub fn next_header(&mut self) {
        if !self.headers.is_empty() {
            self.selected_header = (self.selected_header + 1) % self.headers.len();
        }
    }

    pub fn prev_header(&mut self) {
        if !self.headers.is_empty() {
            self.selected_header = self
                .selected_header
                .checked_sub(1)
                .unwrap_or(self.headers.len() - 1);
        }
    }

    pub fn toggle_response_section(&mut self) {
        self.response_section = self.response_section.toggle();
        self.response_scroll = 0;
    }

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }
}

impl Default for TabPanel {
    fn default() -> Self {
        TabPanel::new(RequestState::default())
    }
}

/// Title for a URL being typed: the host without a leading "www.", or the
/// first characters of the raw input when it does not parse.
pub fn title_from_url(input: &str) -> String {
    let title = match Url::parse(input) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Err(_) => truncate_chars(input, TITLE_MAX_CHARS),
    };

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

/// Title for a duplicated tab: the last path segment of the URL, query dropped
pub fn duplicate_title(url: &str) -> String {
    let path = url.split('?').next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    if segment.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        truncate_chars(segment, TITLE_MAX_CHARS)
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
