//! UI module for rendering the TUI

mod components;
mod employees;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Employees => employees::draw_list(frame, main_area, app),
        View::EmployeeForm => forms::draw_employee_form(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Save failures overlay everything
    if let Some(message) = &app.state.error_message {
        components::render_save_error_dialog(frame, message);
    }
}
