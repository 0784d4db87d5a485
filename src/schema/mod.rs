//! Form schema: the record shape and its validation rules

mod record;
mod validator;

pub use record::{Category, FieldName, Record};
pub use validator::{messages, validate, validate_all, FieldResult, ValidationReport};
