//! Keyboard focus within the wizard form

use crate::schema::{Category, FieldName};
use crate::wizard::Step;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// A focusable row of the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSlot {
    Input(FieldName),
    CategoryGrid,
    Buttons,
}

/// Buttons of the action row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardButton {
    Reset,
    Previous,
    Next,
    Submit,
    StartNew,
}

impl WizardButton {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reset => "Reset",
            Self::Previous => "Previous",
            Self::Next => "Next",
            Self::Submit => "Submit",
            Self::StartNew => "Submit Another Response",
        }
    }

    /// Buttons shown for a step, left to right
    pub fn for_page(step: Step, submitted: bool) -> Vec<Self> {
        if submitted {
            return vec![Self::StartNew];
        }
        let mut buttons = vec![Self::Reset];
        if !step.is_first() {
            buttons.push(Self::Previous);
        }
        buttons.push(if step.is_last() { Self::Submit } else { Self::Next });
        buttons
    }
}

/// Focus state of the wizard page: which row is active, which button is
/// selected on the button row and where the category cursor sits
#[derive(Debug, Clone)]
pub struct WizardForm {
    step: Step,
    submitted: bool,
    pub active_field_index: usize,
    pub selected_button: usize,
    pub category_cursor: usize,
}

impl WizardForm {
    pub fn new(step: Step, submitted: bool) -> Self {
        let mut form = Self {
            step,
            submitted,
            active_field_index: 0,
            selected_button: 0,
            category_cursor: 0,
        };
        form.select_primary_button();
        form
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Rows of the page for the current step
    pub fn slots(&self) -> Vec<FormSlot> {
        if self.submitted {
            return vec![FormSlot::Buttons];
        }
        let mut slots: Vec<FormSlot> = match self.step {
            Step::Categories => vec![FormSlot::CategoryGrid],
            step => step.fields().iter().map(|f| FormSlot::Input(*f)).collect(),
        };
        slots.push(FormSlot::Buttons);
        slots
    }

    pub fn buttons(&self) -> Vec<WizardButton> {
        WizardButton::for_page(self.step, self.submitted)
    }

    pub fn active_slot(&self) -> FormSlot {
        self.slots()
            .get(self.active_field_index)
            .copied()
            .unwrap_or(FormSlot::Buttons)
    }

    /// Text field being edited, if the active row is an input
    pub fn active_input(&self) -> Option<FieldName> {
        match self.active_slot() {
            FormSlot::Input(field) => Some(field),
            _ => None,
        }
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_slot() == FormSlot::Buttons
    }

    pub fn selected(&self) -> Option<WizardButton> {
        self.buttons().get(self.selected_button).copied()
    }

    /// Select the rightmost button (Next, Submit or Submit Another)
    pub fn select_primary_button(&mut self) {
        self.selected_button = self.buttons().len().saturating_sub(1);
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        let count = self.buttons().len();
        self.selected_button = (self.selected_button + 1) % count;
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        let count = self.buttons().len();
        if self.selected_button == 0 {
            self.selected_button = count - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    pub fn focused_category(&self) -> Category {
        Category::ALL[self.category_cursor.min(Category::ALL.len() - 1)]
    }

    /// Move the category cursor by `delta` positions, clamped to the grid
    pub fn move_category_cursor(&mut self, delta: isize) {
        let last = Category::ALL.len() as isize - 1;
        let next = (self.category_cursor as isize + delta).clamp(0, last);
        self.category_cursor = next as usize;
    }

    /// Follow the controller to a new page. Focus is reset when the page
    /// changed; staying on the same page keeps it.
    pub fn sync(&mut self, step: Step, submitted: bool) {
        if self.step != step || self.submitted != submitted {
            *self = Self::new(step, submitted);
        }
    }
}

impl Default for WizardForm {
    fn default() -> Self {
        Self::new(Step::default(), false)
    }
}

impl Form for WizardForm {
    fn field_count(&self) -> usize {
        self.slots().len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
}
