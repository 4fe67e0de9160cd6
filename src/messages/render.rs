//! Render state - data structure sent from App layer to UI for rendering

use crate::app::panel::ResponseSection;
use crate::messages::ui_events::{Focus, HeaderField, InputMode};
use crate::models::{Header, HttpMethod, ResponseView, TabId};

/// One entry of the tab bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSummary {
    pub id: TabId,
    pub title: String,
    pub is_active: bool,
    pub is_loading: bool,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Tab bar
    pub tabs: Vec<TabSummary>,
    pub active_tab: TabId,
    /// Title being typed while renaming
    pub title_buffer: String,

    // Active tab request data
    pub method: HttpMethod,
    pub url: String,
    pub body: String,
    pub headers: Vec<Header>,
    pub selected_header: usize,
    pub header_field: HeaderField,
    pub notice: Option<String>,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Active tab response
    pub response: ResponseView,
    pub response_section: ResponseSection,
    pub response_scroll: u16,
    pub is_loading: bool,

    // Popups
    pub show_help: bool,
}
