//! Courier TUI - multi-tab REST client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - tab registry and command processing
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use courier_tui::app::panel::ResponseSection;
use courier_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME, UI_POLL_INTERVAL_MS};
use courier_tui::messages::ui_events::{key_to_ui_event, Focus, HeaderField, InputMode};
use courier_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use courier_tui::models::{ResponseOutcome, ResponseView};
use courier_tui::ui::{
    format_bytes, format_headers, highlight_json, method_color, render_tab_bar, render_tabs,
    status_color, status_label,
};
use courier_tui::{AppActor, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(version = APP_VERSION, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode().context("failed to enable raw mode")?;
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = render_rx
        .recv()
        .await
        .context("app actor stopped before the first render")?;

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(UI_POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, &current_state) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Tab bar
            Constraint::Length(3),  // Method + URL
            Constraint::Length(8),  // Headers / Body
            Constraint::Min(5),     // Response
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, chunks[0]);
    draw_url_bar(f, state, chunks[1]);
    draw_request_panels(f, state, chunks[2]);
    draw_response(f, state, chunks[3]);
    draw_status_bar(f, state, chunks[4]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let renaming = (state.input_mode == InputMode::Renaming).then_some(state.title_buffer.as_str());
    f.render_widget(render_tab_bar(&state.tabs, renaming), area);
}

fn focus_border(state: &RenderState, focus: Focus) -> Style {
    if state.focus != focus {
        Style::default()
    } else if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_editing = state.focus == Focus::Url && state.input_mode == InputMode::Editing;
    let loading = if state.is_loading { " [sending...]" } else { "" };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(state, Focus::Url))
        .title(format!(" {}{} ", state.method.as_str(), loading))
        .title_style(Style::default().fg(method_color(state.method)).bold());

    if let Some(notice) = &state.notice {
        block = block.title_bottom(
            Line::from(format!(" {} ", notice))
                .style(Style::default().fg(Color::Red))
                .right_aligned(),
        );
    }

    let input = Paragraph::new(state.url.as_str()).block(block);
    f.render_widget(input, area);

    if is_editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let typed = state.url.get(..state.cursor_position).map_or(0, |s| s.chars().count());
        let cursor_x = (area.x + typed as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_request_panels(f: &mut Frame, state: &RenderState, area: Rect) {
    let tabs_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let selected = if state.focus == Focus::Body { 1 } else { 0 };
    f.render_widget(render_tabs(&["Headers", "Body"], selected), tabs_area[0]);

    if selected == 1 {
        draw_body_panel(f, state, tabs_area[1]);
    } else {
        draw_headers_panel(f, state, tabs_area[1]);
    }
}

fn draw_headers_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.focus == Focus::Headers;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;

    let items: Vec<ListItem> = state
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let selected = is_focused && i == state.selected_header;
            let style = if h.key.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            let key = if h.key.is_empty() { "<key>" } else { h.key.as_str() };
            let marker = match (selected && is_editing, state.header_field) {
                (true, HeaderField::Key) => "> [key] ",
                (true, HeaderField::Value) => "> [value] ",
                (false, _) if selected => "> ",
                _ => "  ",
            };
            ListItem::new(format!("{}{}: {}", marker, key, h.value)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(state, Focus::Headers))
            .title(" Headers (a:add d:del e:edit Tab:key/value) "),
    );
    f.render_widget(list, area);
}

fn draw_body_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.method.allows_body() {
        format!(" Body ({}) ", state.method)
    } else {
        format!(" Body (not sent with {}) ", state.method)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(state, Focus::Body))
        .title(title);

    let body = Paragraph::new(state.body.as_str())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(body, area);
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(state, Focus::Response));

    let (block, lines) = match &state.response {
        ResponseView::Empty => (
            block.title(" Response "),
            vec![Line::from(Span::styled(
                "Press 's' to send the request.",
                Style::default().fg(Color::DarkGray),
            ))],
        ),
        ResponseView::Pending => (
            block.title(" Response "),
            vec![Line::from(Span::styled(
                "Waiting for request...",
                Style::default().fg(Color::DarkGray),
            ))],
        ),
        ResponseView::Ready(outcome) => {
            let status = Span::styled(
                format!(" {} ", status_label(outcome)),
                Style::default().fg(status_color(outcome)).bold(),
            );
            let metrics = format!(
                " {} ms | {} | v:{} ",
                outcome.elapsed_ms(),
                format_bytes(outcome.size_bytes()),
                match state.response_section {
                    ResponseSection::Body => "headers",
                    ResponseSection::Headers => "body",
                }
            );
            let block = block
                .title(status)
                .title_bottom(Line::from(metrics).right_aligned());
            (block, response_lines(outcome, state.response_section))
        }
    };

    let response = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(response, area);
}

fn response_lines(outcome: &ResponseOutcome, section: ResponseSection) -> Vec<Line<'static>> {
    match (outcome, section) {
        (ResponseOutcome::Failure { error_message }, _) => vec![
            Line::from(Span::styled("Request Failed:", Style::default().fg(Color::Red).bold())),
            Line::from("(e.g., connection refused, DNS error)"),
            Line::from(error_message.clone()),
        ],
        (ResponseOutcome::Success(resp), ResponseSection::Headers) => format_headers(&resp.headers)
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect(),
        (ResponseOutcome::Success(resp), ResponseSection::Body) => match &resp.body_pretty {
            Some(pretty) => highlight_json(pretty),
            None => resp.body_raw.lines().map(|l| Line::from(l.to_string())).collect(),
        },
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = match state.input_mode {
        InputMode::Renaming => " Enter:save title | Esc:cancel ",
        InputMode::Editing => " Esc:stop editing | arrows:move | Enter:send (URL) ",
        InputMode::Normal if state.is_loading => " Sending... ",
        InputMode::Normal => " n:new x:close y:duplicate r:rename [/]:switch | s:send | ?:help | q:quit ",
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = format!(
        r#"
 {} v{} - Keyboard Shortcuts

 TABS
   n / Ctrl+T         New tab
   x / Ctrl+W         Close tab
   y                  Duplicate tab
   r                  Rename tab
   [ / ]              Previous / next tab
   1-9                Jump to tab

 REQUEST
   Tab / Shift+Tab    Switch focus (URL, Headers, Body, Response)
   e / Enter          Edit focused field
   m                  Cycle HTTP method
   s                  Send request

 HEADERS
   a / d              Add / delete header row
   Tab (editing)      Switch between key and value

 RESPONSE
   v / Enter          Toggle body / headers
   ↑ / ↓              Scroll

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#,
        APP_NAME, APP_VERSION
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
