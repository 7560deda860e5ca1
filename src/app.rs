//! Application state and core logic

use crate::platform::ACTION_MODIFIER;
use crate::service::{EmployeeService, ServiceError};
use crate::state::{
    cycle_option, is_numeric_field, selector_options, AppState, Employee, EmployeeForm,
    FormAction, FormError, FormFocus, FormSession, FormSettings, MessageTable, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Result of a background record fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// One record requested by the form session `session`
    Employee {
        session: u64,
        result: Result<Employee, ServiceError>,
    },
    /// The employee list
    Employees(Result<Vec<Employee>, ServiceError>),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Record service backend
    service: Arc<dyn EmployeeService>,
    /// Schema settings for new form sessions
    settings: FormSettings,
    /// Validation messages shown under fields
    messages: MessageTable,
    fetch_tx: UnboundedSender<FetchOutcome>,
    fetch_rx: UnboundedReceiver<FetchOutcome>,
    next_session_id: u64,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(service: Arc<dyn EmployeeService>, settings: FormSettings) -> Self {
        let (fetch_tx, fetch_rx) = unbounded_channel();
        Self {
            state: AppState::default(),
            service,
            messages: MessageTable::new(&settings),
            settings,
            fetch_tx,
            fetch_rx,
            next_session_id: 0,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Show an error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.error_message = Some(message.into());
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.state.status_message = Some(message.into());
    }

    /// Fetch the employee list in the background
    pub fn request_employees(&mut self) {
        self.state.employees_loading = true;
        let service = Arc::clone(&self.service);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = service.get_employees().await;
            // Receiver only disappears on shutdown
            let _ = tx.send(FetchOutcome::Employees(result));
        });
    }

    fn begin_session(&mut self, employee_id: Option<u64>) -> u64 {
        self.next_session_id += 1;
        let id = self.next_session_id;
        let mut session = FormSession::new(id, employee_id, &self.settings);
        session.refresh_errors(&self.messages);
        self.state.form = Some(session);
        self.state.current_view = View::EmployeeForm;
        id
    }

    /// Start a create session with an empty form
    pub fn open_create_form(&mut self) {
        let session = self.begin_session(None);
        tracing::info!(session, "Opened create form");
    }

    /// Start an edit session and fetch the record in the background
    pub fn open_edit_form(&mut self, employee_id: u64) {
        let session = self.begin_session(Some(employee_id));
        tracing::info!(session, employee_id, "Opened edit form");

        let service = Arc::clone(&self.service);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = service.get_employee(employee_id).await;
            let _ = tx.send(FetchOutcome::Employee { session, result });
        });
    }

    /// Apply every fetch result that arrived since the last call
    pub fn poll_fetches(&mut self) {
        while let Ok(outcome) = self.fetch_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Employees(Ok(employees)) => {
                tracing::debug!(count = employees.len(), "Loaded employees");
                self.state.set_employees(employees);
            }
            FetchOutcome::Employees(Err(err)) => {
                tracing::warn!("Failed to load employees: {err}");
                self.state.employees_loading = false;
                self.set_status("Could not load employees");
            }
            FetchOutcome::Employee { session, result } => {
                let messages = &self.messages;
                let Some(form) = self.state.form.as_mut().filter(|f| f.id == session) else {
                    tracing::debug!(session, "Ignoring record for a closed form");
                    return;
                };
                form.loading = false;
                match result {
                    Ok(employee) => {
                        form.form.patch_employee(&employee);
                        form.clamp_focus();
                        form.refresh_errors(messages);
                    }
                    Err(err) => {
                        tracing::warn!("Failed to load employee: {err}");
                        self.set_status("Could not load employee");
                    }
                }
            }
        }
    }

    /// Leave the form and return to the list
    pub fn go_back(&mut self) {
        if let Some(form) = self.state.form.take() {
            tracing::debug!(session = form.id, "Closed form");
        }
        self.state.current_view = View::Employees;
        self.request_employees();
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog swallows input until dismissed
        if self.state.error_message.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.error_message = None;
            }
            return Ok(());
        }

        self.state.status_message = None;
        match self.state.current_view {
            View::Employees => self.handle_list_key(key),
            View::EmployeeForm => self.handle_form_key(key).await,
        }
        Ok(())
    }

    /// Handle keys in the employee list
    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.employees.len();
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('n') => self.open_create_form(),
            KeyCode::Char('r') => self.request_employees(),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(id) = self.state.selected_employee().map(|e| e.id) {
                    self.open_edit_form(id);
                }
            }
            _ => {}
        }
    }

    /// Handle keys in the employee form
    async fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(session) = self.state.form.as_ref() else {
            return;
        };
        let on_actions = session.focus == FormFocus::Actions;
        let selected_action = session.selected_action;
        let shortcut = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(ACTION_MODIFIER);

        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('s') if shortcut => self.submit().await,
            KeyCode::Char('n') if shortcut => self.add_skill(),
            KeyCode::Char('d') if shortcut => self.remove_focused_skill(),
            KeyCode::Char('r') if shortcut => self.reset_form(),
            KeyCode::Tab | KeyCode::Down => self.with_session(FormSession::next_focus),
            KeyCode::BackTab | KeyCode::Up => self.with_session(FormSession::prev_focus),
            // Action panel
            KeyCode::Left if on_actions => {
                self.with_session(|s| s.selected_action = s.selected_action.prev())
            }
            KeyCode::Right if on_actions => {
                self.with_session(|s| s.selected_action = s.selected_action.next())
            }
            KeyCode::Enter if on_actions => self.run_action(selected_action).await,
            // Field input
            KeyCode::Enter => self.with_session(FormSession::next_focus),
            KeyCode::Left => self.cycle_selector(false),
            KeyCode::Right | KeyCode::Char(' ') if self.focused_selector().is_some() => {
                self.cycle_selector(true)
            }
            KeyCode::Char(c) if !on_actions && !shortcut => self.type_char(c),
            KeyCode::Backspace if !on_actions => self.erase(),
            _ => {}
        }
    }

    async fn run_action(&mut self, action: FormAction) {
        match action {
            FormAction::Save => self.submit().await,
            FormAction::AddSkill => self.add_skill(),
            FormAction::Reset => self.reset_form(),
            FormAction::Cancel => self.go_back(),
        }
    }

    fn with_session(&mut self, f: impl FnOnce(&mut FormSession)) {
        if let Some(session) = self.state.form.as_mut() {
            f(session);
            session.refresh_errors(&self.messages);
        }
    }

    /// Apply an edit to the focused leaf and rebuild messages
    fn edit_focused(&mut self, f: impl FnOnce(&mut EmployeeForm, &str) -> Result<(), FormError>) {
        let messages = &self.messages;
        let Some(session) = self.state.form.as_mut() else {
            return;
        };
        let Some(path) = session.focused_path() else {
            return;
        };
        if let Err(err) = f(&mut session.form, &path) {
            tracing::warn!("Form edit failed: {err}");
            return;
        }
        session.refresh_errors(messages);
    }

    fn focused_selector(&self) -> Option<&'static [&'static str]> {
        let path = self.state.form.as_ref()?.focused_path()?;
        selector_options(&path)
    }

    fn type_char(&mut self, c: char) {
        self.edit_focused(|form, path| {
            if selector_options(path).is_some() {
                return Ok(());
            }
            if is_numeric_field(path) && !c.is_ascii_digit() {
                return Ok(());
            }
            form.input_char(path, c)
        });
    }

    fn erase(&mut self) {
        self.edit_focused(|form, path| {
            if selector_options(path).is_some() {
                form.set_value(path, "")
            } else {
                form.backspace(path)
            }
        });
    }

    fn cycle_selector(&mut self, forward: bool) {
        self.edit_focused(|form, path| {
            let Some(options) = selector_options(path) else {
                return Ok(());
            };
            let current = form.value(path).unwrap_or("");
            let next = cycle_option(current, options, forward);
            form.set_value(path, &next)
        });
    }

    pub fn add_skill(&mut self) {
        self.with_session(|s| s.form.add_skill(None));
    }

    /// Remove the skill entry holding focus
    pub fn remove_focused_skill(&mut self) {
        let Some(index) = self
            .state
            .form
            .as_ref()
            .and_then(FormSession::focused_skill_index)
        else {
            self.set_status("Focus a skill to remove it");
            return;
        };
        let mut removed = Ok(());
        self.with_session(|s| {
            removed = s.form.remove_skill(index);
            s.clamp_focus();
        });
        if let Err(err) = removed {
            tracing::warn!("Could not remove skill: {err}");
        }
    }

    pub fn reset_form(&mut self) {
        self.with_session(|s| {
            s.form.reset();
            s.focus = FormFocus::default();
        });
    }

    /// Validate and save the form
    pub async fn submit(&mut self) {
        let Some(session) = self.state.form.as_mut() else {
            return;
        };
        if session.loading {
            self.set_status("Still loading employee");
            return;
        }
        if !session.form.is_valid() {
            session.form.mark_all_touched();
            session.refresh_errors(&self.messages);
            self.set_status("Fix the highlighted fields before saving");
            return;
        }

        let employee = session.form.to_employee(session.employee_id.unwrap_or_default());
        let result = if session.is_edit() {
            self.service.update_employee(&employee).await.map(|_| employee.id)
        } else {
            self.service.add_employee(&employee).await.map(|stored| stored.id)
        };

        match result {
            Ok(id) => {
                tracing::info!(employee_id = id, "Saved employee");
                self.go_back();
                self.set_status(format!("Saved {}", employee.full_name));
            }
            Err(err) => {
                tracing::warn!("Failed to save employee: {err}");
                self.push_error(err.to_string());
            }
        }
    }
}
