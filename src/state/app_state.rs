//! Application state definitions

use super::forms::WizardForm;
use std::collections::VecDeque;
use uuid::Uuid;

/// Which panel receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    Submissions,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Form => Self::Submissions,
            Self::Submissions => Self::Form,
        }
    }
}

/// A deletion waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteAction {
    pub submission_id: Uuid,
    /// 1-based position shown as "Submission N"
    pub display_number: usize,
    pub entity_display: String,
    /// false = Cancel, true = Delete
    pub selected_option: bool,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub focus: Focus,
    pub form: WizardForm,

    // Submissions panel
    pub selected_index: usize,

    // Dialogs
    pub pending_delete: Option<PendingDeleteAction>,
    error_queue: VecDeque<String>,
}

impl AppState {
    /// State for a wizard page with nothing else open
    pub fn new(form: WizardForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

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

    /// Keep the selection inside a list of `len` items, and leave the
    /// submissions panel when it has become empty
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected_index = 0;
            self.focus = Focus::Form;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    /// Error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Errors waiting behind the one shown
    pub fn queued_errors(&self) -> usize {
        self.error_queue.len().saturating_sub(1)
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }
}
