//! Field validation rules
//!
//! Rules are fixed: every field is required, email must look like an
//! address, phone must be digits only and at least one category must be
//! picked. Validation is a pure function of the record.

use super::record::{FieldName, Record};
use once_cell::sync::Lazy;
use regex::Regex;

/// Address shape. The leading-dot and double-dot restrictions on the local
/// part are checked separately in [`is_valid_email`].
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("email pattern must compile: {e}"))
});

/// User-facing validation messages
pub mod messages {
    pub const NAME_REQUIRED: &str = "Name is required";
    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const EMAIL_INVALID: &str = "Invalid email format";
    pub const ADDRESS_REQUIRED: &str = "Address is required";
    pub const PHONE_REQUIRED: &str = "Phone number is required";
    pub const PHONE_DIGITS_ONLY: &str = "Phone number must contain only digits";
    pub const CATEGORIES_REQUIRED: &str = "Select at least one category";
}

use messages::*;

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResult {
    pub field: FieldName,
    /// `None` when the field is valid
    pub message: Option<&'static str>,
}

impl FieldResult {
    pub fn is_valid(&self) -> bool {
        self.message.is_none()
    }
}

/// Per-field results for a set of validated fields, kept in schema order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    results: Vec<FieldResult>,
}

impl ValidationReport {
    /// True when every validated field passed (vacuously true when empty)
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(FieldResult::is_valid)
    }

    /// Message for a field, if it was validated and failed
    pub fn message(&self, field: FieldName) -> Option<&'static str> {
        self.results
            .iter()
            .find(|r| r.field == field)
            .and_then(|r| r.message)
    }

    pub fn result(&self, field: FieldName) -> Option<&FieldResult> {
        self.results.iter().find(|r| r.field == field)
    }

    /// Failed fields with their messages
    pub fn errors(&self) -> impl Iterator<Item = (FieldName, &'static str)> + '_ {
        self.results
            .iter()
            .filter_map(|r| r.message.map(|m| (r.field, m)))
    }

    /// First failed field in schema order
    pub fn first_invalid(&self) -> Option<FieldName> {
        self.errors().next().map(|(field, _)| field)
    }

    /// Replace (or add) the result for one field
    pub fn merge(&mut self, result: FieldResult) {
        match self.results.iter_mut().find(|r| r.field == result.field) {
            Some(existing) => *existing = result,
            None => {
                self.results.push(result);
                self.results.sort_by_key(|r| r.field);
            }
        }
    }

    /// Drop the messages of every field
    pub fn clear(&mut self) {
        self.results.clear();
    }
}

/// Check the email rule used by the schema
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    !local.starts_with('.') && !local.contains("..") && EMAIL_PATTERN.is_match(email)
}

fn check(record: &Record, field: FieldName) -> Option<&'static str> {
    match field {
        FieldName::Name if record.name.is_empty() => Some(NAME_REQUIRED),
        FieldName::Email if record.email.is_empty() => Some(EMAIL_REQUIRED),
        FieldName::Email if !is_valid_email(&record.email) => Some(EMAIL_INVALID),
        FieldName::Address if record.address.is_empty() => Some(ADDRESS_REQUIRED),
        FieldName::Phone if record.phone.is_empty() => Some(PHONE_REQUIRED),
        FieldName::Phone if !record.phone.chars().all(|c| c.is_ascii_digit()) => {
            Some(PHONE_DIGITS_ONLY)
        }
        FieldName::Categories if record.categories.is_empty() => Some(CATEGORIES_REQUIRED),
        _ => None,
    }
}

/// Validate the given fields of a record
pub fn validate(record: &Record, fields: &[FieldName]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for &field in fields {
        report.merge(FieldResult {
            field,
            message: check(record, field),
        });
    }
    report
}

/// Validate every field of a record
pub fn validate_all(record: &Record) -> ValidationReport {
    validate(record, &FieldName::ALL)
}
