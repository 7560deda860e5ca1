//! Application state definitions

use super::employee::Employee;
use super::forms::{EmployeeForm, FormErrors, FormSettings, MessageTable};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Employees,
    EmployeeForm,
}

/// Buttons on the form action panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormAction {
    #[default]
    Save,
    AddSkill,
    Reset,
    Cancel,
}

impl FormAction {
    pub const ALL: [FormAction; 4] = [Self::Save, Self::AddSkill, Self::Reset, Self::Cancel];

    pub fn next(&self) -> Self {
        match self {
            Self::Save => Self::AddSkill,
            Self::AddSkill => Self::Reset,
            Self::Reset => Self::Cancel,
            Self::Cancel => Self::Save,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Save => Self::Cancel,
            Self::AddSkill => Self::Save,
            Self::Reset => Self::AddSkill,
            Self::Cancel => Self::Reset,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Save => "Save",
            Self::AddSkill => "Add Skill",
            Self::Reset => "Reset",
            Self::Cancel => "Cancel",
        }
    }
}

/// Which part of the form has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    /// Index into [`EmployeeForm::editable_paths`]
    Field(usize),
    Actions,
}

impl Default for FormFocus {
    fn default() -> Self {
        Self::Field(0)
    }
}

/// One create/edit session. Dropped when the user leaves the form.
#[derive(Debug, Clone)]
pub struct FormSession {
    /// Tag matched against fetch results; stale results are ignored
    pub id: u64,
    /// Record being edited, `None` in create mode
    pub employee_id: Option<u64>,
    pub form: EmployeeForm,
    pub errors: FormErrors,
    pub focus: FormFocus,
    pub selected_action: FormAction,
    /// Waiting for the record to arrive
    pub loading: bool,
}

impl FormSession {
    pub fn new(id: u64, employee_id: Option<u64>, settings: &FormSettings) -> Self {
        Self {
            id,
            employee_id,
            form: EmployeeForm::new(settings),
            errors: FormErrors::default(),
            focus: FormFocus::default(),
            selected_action: FormAction::default(),
            loading: employee_id.is_some(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.employee_id.is_some()
    }

    /// Rebuild display messages from the current tree
    pub fn refresh_errors(&mut self, table: &MessageTable) {
        self.errors = self.form.errors(table);
    }

    /// Path of the focused leaf, `None` on the action panel
    pub fn focused_path(&self) -> Option<String> {
        match self.focus {
            FormFocus::Field(index) => self.form.editable_paths().into_iter().nth(index),
            FormFocus::Actions => None,
        }
    }

    /// Skill entry the focused leaf belongs to
    pub fn focused_skill_index(&self) -> Option<usize> {
        let path = self.focused_path()?;
        let mut segments = path.split('.');
        match (segments.next(), segments.next()) {
            (Some(super::forms::fields::SKILLS), Some(index)) => index.parse().ok(),
            _ => None,
        }
    }

    /// Move focus forward, touching the field being left
    pub fn next_focus(&mut self) {
        self.blur();
        let count = self.form.editable_paths().len();
        self.focus = match self.focus {
            FormFocus::Field(index) if index + 1 < count => FormFocus::Field(index + 1),
            FormFocus::Field(_) => FormFocus::Actions,
            FormFocus::Actions => FormFocus::Field(0),
        };
    }

    /// Move focus backward, touching the field being left
    pub fn prev_focus(&mut self) {
        self.blur();
        let count = self.form.editable_paths().len();
        self.focus = match self.focus {
            FormFocus::Field(0) => FormFocus::Actions,
            FormFocus::Field(index) => FormFocus::Field(index - 1),
            FormFocus::Actions if count > 0 => FormFocus::Field(count - 1),
            FormFocus::Actions => FormFocus::Actions,
        };
    }

    /// Keep focus on an existing field after the list shrank
    pub fn clamp_focus(&mut self) {
        let count = self.form.editable_paths().len();
        if let FormFocus::Field(index) = self.focus {
            if index >= count {
                self.focus = if count == 0 {
                    FormFocus::Actions
                } else {
                    FormFocus::Field(count - 1)
                };
            }
        }
    }

    fn blur(&mut self) {
        if let Some(path) = self.focused_path() {
            if let Err(err) = self.form.mark_touched(&path) {
                tracing::warn!("Could not mark {path} touched: {err}");
            }
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Data
    pub employees: Vec<Employee>,
    pub employees_loading: bool,

    // Selection
    pub selected_index: usize,

    // Form state
    pub form: Option<FormSession>,

    // UI state
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.employees.get(self.selected_index)
    }

    /// Replace the employee list, keeping the selection in range
    pub fn set_employees(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
        self.employees_loading = false;
        if self.selected_index >= self.employees.len() {
            self.selected_index = self.employees.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FormSession {
        FormSession::new(1, None, &FormSettings::default())
    }

    mod form_action {
        use super::*;

        #[test]
        fn test_next_and_prev_wrap() {
            assert_eq!(FormAction::Cancel.next(), FormAction::Save);
            assert_eq!(FormAction::Save.prev(), FormAction::Cancel);
            for action in FormAction::ALL {
                assert_eq!(action.next().prev(), action);
            }
        }

        #[test]
        fn test_labels() {
            assert_eq!(FormAction::AddSkill.label(), "Add Skill");
            assert_eq!(FormAction::default(), FormAction::Save);
        }
    }

    mod form_session {
        use super::*;

        #[test]
        fn test_create_session_is_not_loading() {
            let s = session();
            assert!(!s.loading);
            assert!(!s.is_edit());
            assert_eq!(s.focused_path().as_deref(), Some("fullName"));
        }

        #[test]
        fn test_edit_session_starts_loading() {
            let s = FormSession::new(2, Some(5), &FormSettings::default());
            assert!(s.loading);
            assert!(s.is_edit());
        }

        #[test]
        fn test_next_focus_touches_left_field() {
            let mut s = session();
            s.next_focus();
            assert_eq!(s.focused_path().as_deref(), Some("emailGroup.email"));
            assert!(s.form.control("fullName").unwrap().is_touched());
        }

        #[test]
        fn test_focus_cycles_through_actions() {
            let mut s = session();
            // 5 top-level leaves + 3 skill leaves
            for _ in 0..8 {
                s.next_focus();
            }
            assert_eq!(s.focus, FormFocus::Actions);
            s.next_focus();
            assert_eq!(s.focus, FormFocus::Field(0));
            s.prev_focus();
            assert_eq!(s.focus, FormFocus::Actions);
            s.prev_focus();
            assert_eq!(s.focus, FormFocus::Field(7));
        }

        #[test]
        fn test_focus_past_last_field_moves_to_actions() {
            let mut s = session();
            s.focus = FormFocus::Field(99);
            assert_eq!(s.focused_path(), None);
            s.next_focus();
            assert_eq!(s.focus, FormFocus::Actions);
            assert!(!s.form.control("fullName").unwrap().is_touched());
        }

        #[test]
        fn test_prev_focus_touches_left_field() {
            let mut s = session();
            s.focus = FormFocus::Field(3);
            s.prev_focus();
            assert!(s.form.control("contactPreference").unwrap().is_touched());
            assert_eq!(s.focused_path().as_deref(), Some("emailGroup.confirmEmail"));
        }

        #[test]
        fn test_focused_skill_index() {
            let mut s = session();
            assert_eq!(s.focused_skill_index(), None);
            s.focus = FormFocus::Field(6);
            assert_eq!(s.focused_path().as_deref(), Some("skills.0.experienceInYears"));
            assert_eq!(s.focused_skill_index(), Some(0));
        }

        #[test]
        fn test_clamp_focus_after_removal() {
            let mut s = session();
            s.focus = FormFocus::Field(7);
            s.form.remove_skill(0).unwrap();
            s.clamp_focus();
            assert_eq!(s.focus, FormFocus::Field(4));
        }

        #[test]
        fn test_refresh_errors_after_blur() {
            let table = MessageTable::new(&FormSettings::default());
            let mut s = session();
            s.next_focus();
            s.refresh_errors(&table);
            assert_eq!(s.errors.get("fullName"), "Full Name is required.");
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn test_move_selection_bounds() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
            state.move_selection_down(2);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);
        }

        #[test]
        fn test_set_employees_clamps_selection() {
            let mut state = AppState {
                selected_index: 4,
                employees_loading: true,
                ..Default::default()
            };
            state.set_employees(vec![Employee::default(), Employee::default()]);
            assert_eq!(state.selected_index, 1);
            assert!(!state.employees_loading);

            state.set_employees(Vec::new());
            assert_eq!(state.selected_index, 0);
            assert!(state.selected_employee().is_none());
        }
    }
}
