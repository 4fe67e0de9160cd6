//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::{Focus, HeaderField, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{ResponseOutcome, TabId};

impl AppState {
    // ========================
    // Tab lifecycle
    // ========================

    pub fn new_tab(&mut self) {
        self.registry.create_tab(None);
        self.reset_tab_ui();
    }

    pub fn activate_tab(&mut self, id: TabId) {
        if self.registry.active_id() != id {
            self.registry.activate(id);
            self.reset_tab_ui();
        }
    }

    pub fn close_tab(&mut self, id: TabId) {
        let was_active = self.registry.active_id() == id;
        self.registry.close(id);
        if was_active {
            self.reset_tab_ui();
        }
    }

    pub fn duplicate_tab(&mut self, id: TabId) {
        if self.registry.duplicate(id).is_some() {
            self.reset_tab_ui();
        }
    }

    pub fn next_tab(&mut self) {
        self.registry.next();
        self.reset_tab_ui();
    }

    pub fn prev_tab(&mut self) {
        self.registry.prev();
        self.reset_tab_ui();
    }

    pub fn start_renaming(&mut self) {
        self.title_buffer = self.registry.active().title.clone();
        self.cursor_position = self.title_buffer.len();
        self.input_mode = InputMode::Renaming;
    }

    pub fn commit_rename(&mut self) {
        let id = self.registry.active_id();
        let title = std::mem::take(&mut self.title_buffer);
        self.registry.rename(id, &title);
        self.input_mode = InputMode::Normal;
    }

    /// Editing state belongs to the tab that was active
    fn reset_tab_ui(&mut self) {
        self.input_mode = InputMode::Normal;
        self.cursor_position = 0;
        self.header_field = HeaderField::Key;
        self.title_buffer.clear();
    }

    // ========================
    // Navigation
    // ========================

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn scroll_up(&mut self) {
        self.registry.active_mut().panel.scroll_up();
    }

    pub fn scroll_down(&mut self) {
        self.registry.active_mut().panel.scroll_down();
    }

    pub fn toggle_response_section(&mut self) {
        self.registry.active_mut().panel.toggle_response_section();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.current_input_mut().is_some() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        if self.input_mode == InputMode::Renaming {
            self.title_buffer.clear();
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let Some(input) = self.current_input_mut() else {
            return;
        };
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
            self.field_edited();
        }
    }

    pub fn delete_char(&mut self) {
        let cursor_pos = self.cursor_position;
        if cursor_pos == 0 {
            return;
        }
        let Some(input) = self.current_input_mut() else {
            return;
        };
        let prev_pos = input[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev_pos);
        self.cursor_position = prev_pos;
        self.field_edited();
    }

    pub fn next_header_field(&mut self) {
        self.header_field = self.header_field.toggle();
        self.cursor_position = self.current_input().len();
    }

    /// Keystroke-level follow-up: URL edits re-derive the tab title
    fn field_edited(&mut self) {
        if self.input_mode == InputMode::Renaming {
            return;
        }
        let tab = self.registry.active_mut();
        tab.panel.notice = None;
        if self.focus == Focus::Url {
            tab.url_edited();
        }
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        self.registry.active_mut().panel.cycle_method();
    }

    // ========================
    // Headers
    // ========================

    pub fn next_header(&mut self) {
        self.registry.active_mut().panel.next_header();
    }

    pub fn prev_header(&mut self) {
        self.registry.active_mut().panel.prev_header();
    }

    pub fn add_header(&mut self) {
        self.registry.active_mut().panel.add_header_row();
        self.header_field = HeaderField::Key;
    }

    pub fn remove_header(&mut self) {
        let panel = &mut self.registry.active_mut().panel;
        let index = panel.selected_header;
        panel.remove_header_row(index);
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Request sending
    // ========================

    /// Put the active tab into its pending state and build the command to
    /// dispatch. Refused locally for an empty URL or an in-flight request.
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.input_mode == InputMode::Editing {
            self.stop_editing();
        }

        let tab = self.registry.active_mut();
        match tab.panel.begin_send() {
            Ok(pending) => Some(NetworkCommand::Execute {
                tab_id: tab.id,
                request_id: pending.request_id,
                request: pending.request,
            }),
            Err(blocked) => {
                tracing::debug!(tab = %tab.id, reason = %blocked, "Send refused");
                None
            }
        }
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::Completed {
                tab_id,
                request_id,
                outcome,
            } => {
                if !self.registry.complete(tab_id, request_id, outcome) {
                    tracing::debug!(
                        tab = %tab_id,
                        id = request_id,
                        "Discarding result for closed tab"
                    );
                }
            }
        }
    }

    /// Release the pending state of a command the network layer never received
    pub fn dispatch_failed(&mut self, cmd: NetworkCommand) {
        if let NetworkCommand::Execute { tab_id, request_id, .. } = cmd {
            tracing::error!(tab = %tab_id, id = request_id, "Network layer unavailable");
            self.registry.complete(
                tab_id,
                request_id,
                ResponseOutcome::failure("Network layer unavailable"),
            );
        }
    }
}
