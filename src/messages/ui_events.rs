//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::messages::RenderState;
use crate::models::TabId;

/// Commands generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Tab lifecycle
    NewTab,
    ActivateTab(TabId),
    CloseTab(TabId),
    DuplicateTab(TabId),
    NextTab,
    PrevTab,
    StartRenaming,
    CommitRename,

    // Focus navigation
    NextFocus,
    PrevFocus,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextHeaderField,

    // Request actions
    SendRequest,
    CycleMethod,

    // Headers
    NextHeader,
    PrevHeader,
    AddHeader,
    RemoveHeader,

    // Response
    ToggleResponseSection,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focused area of the active tab (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Focus {
    #[default]
    Url,
    Headers,
    Body,
    Response,
}

impl Focus {
    pub fn next(&self) -> Focus {
        match self {
            Focus::Url => Focus::Headers,
            Focus::Headers => Focus::Body,
            Focus::Body => Focus::Response,
            Focus::Response => Focus::Url,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::Url => Focus::Response,
            Focus::Headers => Focus::Url,
            Focus::Body => Focus::Headers,
            Focus::Response => Focus::Body,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
    /// Editing the active tab's title
    Renaming,
}

/// Half of a header row being edited
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum HeaderField {
    #[default]
    Key,
    Value,
}

impl HeaderField {
    pub fn toggle(&self) -> HeaderField {
        match self {
            HeaderField::Key => HeaderField::Value,
            HeaderField::Value => HeaderField::Key,
        }
    }
}

/// Convert a key event to a UiEvent based on the current render state
pub fn key_to_ui_event(key: KeyEvent, state: &RenderState) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('t') => return Some(UiEvent::NewTab),
            KeyCode::Char('w') => return Some(UiEvent::CloseTab(state.active_tab)),
            _ => {}
        }
    }

    if state.show_help {
        return Some(UiEvent::CloseHelp);
    }

    match state.input_mode {
        InputMode::Normal => handle_normal_keys(key, state),
        InputMode::Editing => handle_editing_keys(key, state.focus),
        InputMode::Renaming => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::CommitRename),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

fn handle_normal_keys(key: KeyEvent, state: &RenderState) -> Option<UiEvent> {
    let focus = state.focus;
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),

        // Tabs
        KeyCode::Char('n') => Some(UiEvent::NewTab),
        KeyCode::Char('x') => Some(UiEvent::CloseTab(state.active_tab)),
        KeyCode::Char('y') => Some(UiEvent::DuplicateTab(state.active_tab)),
        KeyCode::Char('r') => Some(UiEvent::StartRenaming),
        KeyCode::Char(']') => Some(UiEvent::NextTab),
        KeyCode::Char('[') => Some(UiEvent::PrevTab),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            state.tabs.get(index).map(|t| UiEvent::ActivateTab(t.id))
        }

        KeyCode::Tab => Some(UiEvent::NextFocus),
        KeyCode::BackTab => Some(UiEvent::PrevFocus),
        KeyCode::Char('e') | KeyCode::Enter => match focus {
            Focus::Url | Focus::Headers | Focus::Body => Some(UiEvent::StartEditing),
            Focus::Response => Some(UiEvent::ToggleResponseSection),
        },
        KeyCode::Char('m') => Some(UiEvent::CycleMethod),
        KeyCode::Char('s') => Some(UiEvent::SendRequest),
        KeyCode::Up => match focus {
            Focus::Headers => Some(UiEvent::PrevHeader),
            Focus::Response => Some(UiEvent::ScrollUp),
            _ => None,
        },
        KeyCode::Down => match focus {
            Focus::Headers => Some(UiEvent::NextHeader),
            Focus::Response => Some(UiEvent::ScrollDown),
            _ => None,
        },
        KeyCode::Char('a') if focus == Focus::Headers => Some(UiEvent::AddHeader),
        KeyCode::Char('d') if focus == Focus::Headers => Some(UiEvent::RemoveHeader),
        KeyCode::Char('v') if focus == Focus::Response => Some(UiEvent::ToggleResponseSection),
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent, focus: Focus) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        KeyCode::Tab if focus == Focus::Headers => Some(UiEvent::NextHeaderField),
        KeyCode::Enter => match focus {
            Focus::Url => Some(UiEvent::SendRequest),
            Focus::Body => Some(UiEvent::CharInput('\n')),
            _ => Some(UiEvent::StopEditing),
        },
        _ => None,
    }
}
