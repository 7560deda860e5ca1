//! Save failure dialog

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Title shown when the record service rejects a save
pub const SAVE_ERROR_TITLE: &str = "Could not save employee";

/// Render the save failure overlay. The form behind it keeps its edits.
pub fn render_save_error_dialog(frame: &mut Frame, reason: &str) {
    let bold = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::styled("Enter/Esc", bold),
        Span::raw(" back to the form, "),
        Span::styled(crate::platform::shortcut('s'), bold),
        Span::raw(" to retry"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: SAVE_ERROR_TITLE,
            color: Color::Red,
            message: reason,
            hint: Some(hint),
            max_width: 64,
        },
    );
}
