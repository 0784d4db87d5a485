//! Form rendering module
//!
//! - `field_renderer`: text inputs and validation messages
//! - `step_pages`: the page of each step, the success view and the action row

mod field_renderer;
mod step_pages;

pub use step_pages::draw_wizard;
