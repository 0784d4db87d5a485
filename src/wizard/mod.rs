//! Wizard flow: steps and the controller that moves between them

mod controller;
mod step;

pub use controller::{StepController, StepOutcome};
pub use step::Step;
