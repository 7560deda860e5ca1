//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// How a leaf is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Cycled with Space/Left/Right
    Selector,
}

/// One field box: label on top, value inside, error text on the bottom border
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub error: &'a str,
    pub kind: FieldKind,
    pub is_active: bool,
}

pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldView) {
    let border_color = match (field.is_active, field.error.is_empty()) {
        (_, false) => Color::Red,
        (true, true) => Color::Cyan,
        (false, true) => Color::DarkGray,
    };
    let value_style = if field.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut spans = Vec::new();
    match field.kind {
        FieldKind::Selector => {
            let shown = if field.value.is_empty() {
                "(none)"
            } else {
                field.value
            };
            if field.is_active {
                spans.push(Span::styled("◂ ", Style::default().fg(Color::Cyan)));
                spans.push(Span::styled(shown, value_style));
                spans.push(Span::styled(" ▸", Style::default().fg(Color::Cyan)));
            } else {
                spans.push(Span::styled(shown, Style::default().fg(Color::DarkGray)));
            }
        }
        FieldKind::Text => {
            if field.value.is_empty() && !field.is_active {
                spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::styled(field.value, value_style));
            }
            if field.is_active {
                spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
            }
        }
    }

    let mut block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if !field.error.is_empty() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", field.error),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
