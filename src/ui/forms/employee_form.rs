//! Employee form rendering (create and edit)

use super::field_renderer::{draw_field, draw_help_text, FieldKind, FieldView};
use crate::app::App;
use crate::platform::shortcut;
use crate::state::{
    error_slot, fields, paths, selector_options, FormAction, FormFocus, FormSession,
};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

/// Draw the employee form with its action panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.state.form.as_ref() else {
        return;
    };

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(22), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], session);
    draw_action_panel(frame, main_chunks[1], session);
}

fn field_label(path: &str) -> &'static str {
    match path.rsplit('.').next().unwrap_or(path) {
        fields::FULL_NAME => "Full Name",
        fields::EMAIL => "Email",
        fields::CONFIRM_EMAIL => "Confirm Email",
        fields::CONTACT_PREFERENCE => "Contact Preference",
        fields::PHONE => "Phone",
        fields::SKILL_NAME => "Skill Name",
        fields::EXPERIENCE => "Experience (years)",
        fields::PROFICIENCY => "Proficiency",
        _ => "",
    }
}

/// Draw the leaf at `path` into `area`
fn draw_leaf(frame: &mut Frame, area: Rect, session: &FormSession, path: &str, label: &str) {
    let focused = session.focused_path();
    let view = FieldView {
        label,
        value: session.form.value(path).unwrap_or(""),
        error: session.errors.get(error_slot(path)),
        kind: if selector_options(path).is_some() {
            FieldKind::Selector
        } else {
            FieldKind::Text
        },
        is_active: focused.as_deref() == Some(path),
    };
    draw_field(frame, area, &view);
}

fn split_row(area: Rect, constraints: [Constraint; 2]) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    [chunks[0], chunks[1]]
}

fn draw_form(frame: &mut Frame, area: Rect, session: &FormSession) {
    let title = match (session.employee_id, session.loading) {
        (Some(id), true) => format!(" Edit Employee #{id} (loading...) "),
        (Some(id), false) => format!(" Edit Employee #{id} "),
        (None, _) => " New Employee ".to_string(),
    };
    let border_color = if matches!(session.focus, FormFocus::Field(_)) {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT), // Full name
            Constraint::Length(FIELD_HEIGHT), // Email + confirm
            Constraint::Length(1),            // Email group message
            Constraint::Length(FIELD_HEIGHT), // Contact + phone
            Constraint::Length(1),            // Skills header
            Constraint::Min(FIELD_HEIGHT),    // Skills
            Constraint::Length(1),            // Help
        ])
        .margin(1)
        .split(area);

    draw_leaf(frame, chunks[0], session, fields::FULL_NAME, "Full Name");

    let [email_area, confirm_area] = split_row(chunks[1], [Constraint::Percentage(50); 2]);
    draw_leaf(frame, email_area, session, paths::EMAIL, field_label(paths::EMAIL));
    draw_leaf(
        frame,
        confirm_area,
        session,
        paths::CONFIRM_EMAIL,
        field_label(paths::CONFIRM_EMAIL),
    );

    let mismatch = session.errors.get(fields::EMAIL_GROUP);
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {mismatch}"), Style::default().fg(Color::Red))),
        chunks[2],
    );

    let [contact_area, phone_area] = split_row(chunks[3], [Constraint::Percentage(50); 2]);
    draw_leaf(
        frame,
        contact_area,
        session,
        fields::CONTACT_PREFERENCE,
        field_label(fields::CONTACT_PREFERENCE),
    );
    let phone_label = if session.form.phone_requirement().is_required() {
        "Phone *"
    } else {
        "Phone (optional)"
    };
    draw_leaf(frame, phone_area, session, fields::PHONE, phone_label);

    let header = Line::from(vec![
        Span::styled(
            format!(" Skills ({})", session.form.skill_count()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  {}:add  {}:remove", shortcut('n'), shortcut('d')),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[4]);

    draw_skills(frame, chunks[5], session);

    let help = format!(
        "Tab/Shift+Tab:move  Space/←/→:choose  {}:save  Esc:cancel",
        shortcut('s')
    );
    draw_help_text(frame, chunks[6], &help);
}

/// First skill row to draw so the focused one stays visible
fn skills_offset(focused: Option<usize>, visible: usize) -> usize {
    match focused {
        Some(index) if visible > 0 && index >= visible => index + 1 - visible,
        _ => 0,
    }
}

fn draw_skills(frame: &mut Frame, area: Rect, session: &FormSession) {
    let count = session.form.skill_count();
    if count == 0 {
        let empty = Paragraph::new(" No skills. Add one to save.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let visible = (area.height / FIELD_HEIGHT) as usize;
    let offset = skills_offset(session.focused_skill_index(), visible);

    for (row, index) in (offset..count).take(visible).enumerate() {
        let row_area = Rect {
            y: area.y + row as u16 * FIELD_HEIGHT,
            height: FIELD_HEIGHT,
            ..area
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(25),
                Constraint::Percentage(30),
            ])
            .split(row_area);

        for (cell, field) in cells
            .iter()
            .zip([fields::SKILL_NAME, fields::EXPERIENCE, fields::PROFICIENCY])
        {
            let path = paths::skill(index, field);
            let label = format!("{} #{}", field_label(field), index + 1);
            draw_leaf(frame, *cell, session, &path, &label);
        }
    }
}

fn action_shortcut(action: FormAction) -> Option<String> {
    match action {
        FormAction::Save => Some(shortcut('s')),
        FormAction::AddSkill => Some(shortcut('n')),
        FormAction::Reset => Some(shortcut('r')),
        FormAction::Cancel => Some("Esc".to_string()),
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, session: &FormSession) {
    let on_actions = session.focus == FormFocus::Actions;
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if on_actions {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = FormAction::ALL
        .iter()
        .map(|_| Constraint::Length(BUTTON_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (idx, action) in FormAction::ALL.into_iter().enumerate() {
        let is_enabled = !(action == FormAction::Save && session.loading);
        let key = action_shortcut(action);
        render_action_button(
            frame,
            chunks[idx],
            action.label(),
            key.as_deref(),
            on_actions && session.selected_action == action,
            is_enabled,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_labels_use_last_segment() {
        assert_eq!(field_label(paths::CONFIRM_EMAIL), "Confirm Email");
        assert_eq!(field_label("skills.3.proficiency"), "Proficiency");
        assert_eq!(field_label("unknown"), "");
    }

    #[test]
    fn test_skills_offset_keeps_focus_visible() {
        assert_eq!(skills_offset(None, 2), 0);
        assert_eq!(skills_offset(Some(1), 2), 0);
        assert_eq!(skills_offset(Some(4), 2), 3);
        assert_eq!(skills_offset(Some(4), 0), 0);
    }
}
