//! Employee list view

use super::widgets::render_scrollable_list;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the employee list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let employees = &app.state.employees;
    let title = format!(" Employees ({}) ", employees.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if employees.is_empty() {
        let message = if app.state.employees_loading {
            "Loading employees..."
        } else {
            "No employees found.\nPress 'n' to add one or 'r' to refresh."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(block.inner(area));
    frame.render_widget(block, area);

    let header = Paragraph::new(Line::from(Span::styled(
        format!(" {:<6}{:<16}{:<28}{}", "ID", "Name", "Email", "Contact"),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = employees
        .iter()
        .enumerate()
        .map(|(idx, employee)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸" } else { " " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("{:<6}", format!("#{}", employee.id)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(format!("{:<16}", employee.full_name), style),
                Span::styled(format!("{:<28}", employee.email), style),
                Span::styled(
                    employee.contact_label(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {} skills", employee.skills.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    render_scrollable_list(frame, chunks[1], List::new(items), app.state.selected_index);
}
