use ratatui::{prelude::*, widgets::*};

use crate::messages::TabSummary;
use crate::models::{HttpMethod, ResponseOutcome};

/// Renders the tab bar, marking tabs with an in-flight request
pub fn render_tab_bar<'a>(tabs: &[TabSummary], renaming: Option<&str>) -> Tabs<'a> {
    let selected = tabs.iter().position(|t| t.is_active).unwrap_or(0);
    let titles: Vec<Line> = tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let title = match renaming {
                Some(buffer) if tab.is_active => format!("{}▏", buffer),
                _ => tab.title.clone(),
            };
            let marker = if tab.is_loading { " …" } else { "" };
            Line::from(format!("{}:{}{}", i + 1, title, marker))
        })
        .collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        .divider("|")
}

/// Renders section tabs (e.g. Body | Headers)
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// JSON syntax highlighting for pretty-printed bodies
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let (len, style) = match c {
            '"' => {
                let len = string_token_len(rest);
                let is_key = rest[len..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                (len, Style::default().fg(color))
            }
            '{' | '}' | '[' | ']' => (1, Style::default().fg(Color::Yellow)),
            '-' | '0'..='9' => (
                scan(rest, |c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')),
                Style::default().fg(Color::Yellow),
            ),
            c if c.is_ascii_alphabetic() => {
                let len = scan(rest, |c| c.is_ascii_alphabetic());
                let style = match &rest[..len] {
                    "true" | "false" | "null" => Style::default().fg(Color::Magenta),
                    _ => Style::default(),
                };
                (len, style)
            }
            _ => (scan(rest, |c| !starts_token(c)), Style::default()),
        };

        spans.push(Span::styled(rest[..len].to_string(), style));
        rest = &rest[len..];
    }

    Line::from(spans)
}

fn starts_token(c: char) -> bool {
    matches!(c, '"' | '{' | '}' | '[' | ']' | '-' | '0'..='9') || c.is_ascii_alphabetic()
}

/// Byte length of the string literal at the start of `s`, quotes included
fn string_token_len(s: &str) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return i + 1,
            _ => escaped = false,
        }
    }
    s.len()
}

fn scan(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|(_, c)| !pred(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Status line text, e.g. "200 OK" or "Error connection refused"
pub fn status_label(outcome: &ResponseOutcome) -> String {
    match outcome {
        ResponseOutcome::Success(resp) => format!("{} {}", resp.status_code, resp.status_text)
            .trim_end()
            .to_string(),
        ResponseOutcome::Failure { error_message } => format!("Error {}", error_message),
    }
}

/// Status color: red for failures, green for 2xx, yellow otherwise
pub fn status_color(outcome: &ResponseOutcome) -> Color {
    match outcome {
        ResponseOutcome::Failure { .. } => Color::Red,
        ResponseOutcome::Success(resp) if resp.ok => Color::Green,
        ResponseOutcome::Success(_) => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::GET => Color::Green,
        HttpMethod::POST => Color::Yellow,
        HttpMethod::PUT => Color::Blue,
        HttpMethod::PATCH => Color::Cyan,
        HttpMethod::DELETE => Color::Red,
        HttpMethod::HEAD | HttpMethod::OPTIONS => Color::White,
    }
}

/// Human-readable size in base-1024 units, at most two decimals
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return String::from("0 B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Response headers as "name: value" lines
pub fn format_headers(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}
