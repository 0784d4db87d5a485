//! Form focus and field presentation for the wizard page

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{Form, FormSlot, WizardButton, WizardForm};
