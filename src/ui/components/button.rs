//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a form action button with its shortcut dimmed after the label
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    shortcut: Option<&str>,
    is_selected: bool,
    is_enabled: bool,
) {
    let (border, text) = match (is_selected, is_enabled) {
        (true, _) => (
            Color::Cyan,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        (false, true) => (Color::DarkGray, Style::default()),
        (false, false) => (Color::DarkGray, Style::default().fg(Color::DarkGray)),
    };

    let mut spans = vec![Span::styled(format!(" {label}"), text)];
    if let Some(key) = shortcut {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
