//! Application state and core logic

use crate::config::TuiConfig;
use crate::schema::FieldName;
use crate::state::{
    AppState, Focus, Form, FormField, FormSlot, PendingDeleteAction, WizardButton, WizardForm,
};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use crate::wizard::{StepController, StepOutcome};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Columns of the category checkbox grid
pub const CATEGORY_COLUMNS: usize = 2;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Wizard state machine over the configured store
    pub wizard: StepController<Box<dyn KeyValueStore>>,
    /// Where submissions are stored, for the status bar
    pub storage_label: String,
    /// Transient feedback message
    pub status_message: Option<String>,
    confirm_delete: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance over the file store from configuration.
    /// Falls back to an in-memory store when the file cannot be opened.
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let path = config.resolved_storage_path();
        let (store, label, open_error): (Box<dyn KeyValueStore>, String, Option<StorageError>) =
            match FileStore::open(&path) {
                Ok(store) => {
                    let label = store.path().display().to_string();
                    (Box::new(store), label, None)
                }
                Err(e) => {
                    tracing::error!("Falling back to memory storage: {e}");
                    (Box::new(MemoryStore::new()), "memory (not saved)".to_string(), Some(e))
                }
            };

        let mut app = Self::with_store(store, label, config.confirm_delete())?;
        if let Some(e) = open_error {
            app.push_error(format!("Storage unavailable, changes will not be saved: {e}"));
        }
        Ok(app)
    }

    /// Create an App over an explicit store
    pub fn with_store(
        store: Box<dyn KeyValueStore>,
        storage_label: String,
        confirm_delete: bool,
    ) -> Result<Self> {
        let wizard = StepController::new(store)?;
        let state = AppState::new(WizardForm::new(wizard.step(), wizard.is_submitted()));
        Ok(Self {
            state,
            wizard,
            storage_label,
            status_message: None,
            confirm_delete,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Surface a storage failure and discard the result
    fn report<T>(&mut self, result: Result<T, StorageError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Storage operation failed: {e}");
                self.push_error(format!("Could not save: {e}"));
                None
            }
        }
    }

    /// Bring view state in line with the controller after an operation
    fn sync(&mut self) {
        self.state
            .form
            .sync(self.wizard.step(), self.wizard.is_submitted());
        self.state.clamp_selection(self.wizard.submissions().len());
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.pending_delete.is_some() {
            self.handle_confirm_key(key);
            return Ok(());
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.activate(if self.wizard.is_submitted() {
                WizardButton::StartNew
            } else {
                WizardButton::Next
            });
            return Ok(());
        }
        if key.code == KeyCode::Char('r')
            && key
                .modifiers
                .intersects(KeyModifiers::CONTROL | crate::platform::RESET_MODIFIER)
        {
            self.activate(WizardButton::Reset);
            return Ok(());
        }

        match self.state.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::Submissions => self.handle_submissions_key(key)?,
        }
        Ok(())
    }

    /// Handle keys on the wizard page
    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                if self.state.form.is_buttons_row_active() && !self.wizard.submissions().is_empty()
                {
                    self.state.focus.toggle();
                } else {
                    self.state.form.next_field();
                }
                return;
            }
            KeyCode::BackTab => {
                self.state.form.prev_field();
                return;
            }
            KeyCode::Esc => {
                let last = self.state.form.field_count() - 1;
                self.state.form.set_active_field(last);
                return;
            }
            _ => {}
        }

        match self.state.form.active_slot() {
            FormSlot::Input(field) => self.handle_input_key(field, key),
            FormSlot::CategoryGrid => self.handle_category_key(key),
            FormSlot::Buttons => self.handle_buttons_key(key),
        }
    }

    fn handle_input_key(&mut self, field: FieldName, key: KeyEvent) {
        let current = self.wizard.record().text(field).unwrap_or_default();
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                let value = FormField::push_char(current, c);
                let result = self.wizard.set_text(field, value);
                self.report(result);
            }
            KeyCode::Backspace => {
                if !current.is_empty() {
                    let value = FormField::pop_char(current);
                    let result = self.wizard.set_text(field, value);
                    self.report(result);
                }
            }
            KeyCode::Enter | KeyCode::Down => self.state.form.next_field(),
            KeyCode::Up => self.state.form.prev_field(),
            _ => {}
        }
    }

    fn handle_category_key(&mut self, key: KeyEvent) {
        let columns = CATEGORY_COLUMNS as isize;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.state.form.move_category_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.state.form.move_category_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.state.form.move_category_cursor(-columns),
            KeyCode::Down | KeyCode::Char('j') => self.state.form.move_category_cursor(columns),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let category = self.state.form.focused_category();
                let result = self.wizard.toggle_category(category);
                self.report(result);
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_buttons_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.state.form.prev_button(),
            KeyCode::Right | KeyCode::Char('l') => self.state.form.next_button(),
            KeyCode::Up | KeyCode::Char('k') => self.state.form.prev_field(),
            KeyCode::Down | KeyCode::Char('j') => self.state.form.next_field(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(button) = self.state.form.selected() {
                    self.activate(button);
                }
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Run the action behind a button
    pub fn activate(&mut self, button: WizardButton) {
        self.status_message = None;
        match button {
            WizardButton::Reset => {
                let result = self.wizard.reset();
                if self.report(result).is_some() {
                    self.status_message = Some("Form reset".to_string());
                }
            }
            WizardButton::Previous => {
                let result = self.wizard.previous();
                self.report(result);
            }
            WizardButton::Next | WizardButton::Submit => {
                let result = self.wizard.next();
                match self.report(result) {
                    Some(StepOutcome::Blocked) => {
                        self.sync();
                        self.focus_first_invalid();
                        self.status_message = Some("Please fix the highlighted fields".to_string());
                        return;
                    }
                    Some(StepOutcome::Submitted(_)) => {
                        self.status_message = Some("Form submitted!".to_string());
                    }
                    Some(StepOutcome::Advanced(_)) | Some(StepOutcome::Ignored) | None => {}
                }
            }
            WizardButton::StartNew => {
                let result = self.wizard.start_new();
                self.report(result);
            }
        }
        self.sync();
    }

    /// Put the cursor on the first field showing a message
    fn focus_first_invalid(&mut self) {
        let Some(field) = self.wizard.messages().first_invalid() else {
            return;
        };
        let target = if field.is_text() {
            FormSlot::Input(field)
        } else {
            FormSlot::CategoryGrid
        };
        if let Some(index) = self.state.form.slots().iter().position(|s| *s == target) {
            self.state.form.set_active_field(index);
        }
    }

    /// Handle keys in the submissions panel
    fn handle_submissions_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.wizard.submissions().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(count),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                self.state.focus.toggle();
                self.state.form.set_active_field(0);
            }
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete_selected(),
            KeyCode::Char('y') => {
                if let Err(e) = self.copy_selected_submission() {
                    tracing::warn!("Copy failed: {e}");
                    self.push_error(format!("Failed to copy: {e}"));
                }
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Delete the selected submission, asking first when configured to
    fn request_delete_selected(&mut self) {
        let index = self.state.selected_index;
        let Some(submission) = self.wizard.submissions().get(index) else {
            return;
        };

        if self.confirm_delete {
            self.state.pending_delete = Some(PendingDeleteAction {
                submission_id: submission.id,
                display_number: index + 1,
                entity_display: submission.record.name.clone(),
                selected_option: false,
            });
        } else {
            let id = submission.id;
            self.delete_submission(id);
        }
    }

    fn delete_submission(&mut self, id: uuid::Uuid) {
        let result = self.wizard.delete_submission(id);
        if let Some(true) = self.report(result) {
            self.status_message = Some("Submission deleted".to_string());
        }
        self.sync();
    }

    /// Handle keys while the delete confirmation is open
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.state.pending_delete.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('j')
            | KeyCode::Char('k') => pending.selected_option = !pending.selected_option,
            KeyCode::Enter => {
                let confirmed = pending.selected_option;
                let id = pending.submission_id;
                self.state.pending_delete = None;
                if confirmed {
                    self.delete_submission(id);
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => self.state.pending_delete = None,
            _ => {}
        }
    }

    /// Copy the selected submission to the clipboard as JSON
    fn copy_selected_submission(&mut self) -> Result<()> {
        let Some(submission) = self.wizard.submissions().get(self.state.selected_index) else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(submission)?;
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(json)?;
        self.status_message = Some(format!(
            "Copied submission {}",
            self.state.selected_index + 1
        ));
        Ok(())
    }
}
