//! App state - pure data structure with no I/O logic

use crate::app::registry::TabRegistry;
use crate::messages::ui_events::{Focus, HeaderField, InputMode};
use crate::messages::{RenderState, TabSummary};

/// Main application state - pure data, no I/O
pub struct AppState {
    // Tabs and their request/response contexts
    pub registry: TabRegistry,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub header_field: HeaderField,
    pub title_buffer: String,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            registry: TabRegistry::new(),
            focus: Focus::Url,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            header_field: HeaderField::Key,
            title_buffer: String::new(),
            show_help: false,
        }
    }

    /// Get the focused input field content of the active tab
    pub fn current_input(&self) -> &str {
        if self.input_mode == InputMode::Renaming {
            return &self.title_buffer;
        }
        let panel = &self.registry.active().panel;
        match self.focus {
            Focus::Url => &panel.url,
            Focus::Body => &panel.body,
            Focus::Headers => match panel.headers.get(panel.selected_header) {
                Some(header) => match self.header_field {
                    HeaderField::Key => &header.key,
                    HeaderField::Value => &header.value,
                },
                None => "",
            },
            Focus::Response => "",
        }
    }

    /// Get mutable reference to the focused input field, if it is editable
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        if self.input_mode == InputMode::Renaming {
            return Some(&mut self.title_buffer);
        }
        let header_field = self.header_field;
        let panel = &mut self.registry.active_mut().panel;
        match self.focus {
            Focus::Url => Some(&mut panel.url),
            Focus::Body => Some(&mut panel.body),
            Focus::Headers => {
                let row = panel.headers.get_mut(panel.selected_header)?;
                Some(match header_field {
                    HeaderField::Key => &mut row.key,
                    HeaderField::Value => &mut row.value,
                })
            }
            Focus::Response => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let active = self.registry.active();
        let panel = &active.panel;

        RenderState {
            tabs: self
                .registry
                .tabs()
                .iter()
                .map(|tab| TabSummary {
                    id: tab.id,
                    title: tab.title.clone(),
                    is_active: tab.id == active.id,
                    is_loading: tab.panel.is_pending(),
                })
                .collect(),
            active_tab: active.id,
            title_buffer: self.title_buffer.clone(),
            method: panel.method,
            url: panel.url.clone(),
            body: panel.body.clone(),
            headers: panel.headers.clone(),
            selected_header: panel.selected_header,
            header_field: self.header_field,
            notice: panel.notice.clone(),
            focus: self.focus,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            response: panel.response.clone(),
            response_section: panel.response_section,
            response_scroll: panel.response_scroll,
            is_loading: panel.is_pending(),
            show_help: self.show_help,
        }
    }
}
