//! Form field descriptors

use crate::schema::FieldName;

/// Describes how a text input of the wizard is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: FieldName,
    pub label: &'static str,
    pub placeholder: &'static str,
}

impl FormField {
    /// Descriptor for a text field; None for categories
    pub fn for_field(name: FieldName) -> Option<Self> {
        let placeholder = match name {
            FieldName::Name => "Enter your full name",
            FieldName::Email => "Enter your email address",
            FieldName::Address => "Enter your address",
            FieldName::Phone => "Enter your phone number",
            FieldName::Categories => return None,
        };
        Some(Self {
            name,
            label: name.label(),
            placeholder,
        })
    }

    /// Value after typing `c` at the end of `value`
    pub fn push_char(value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(value);
        next.push(c);
        next
    }

    /// Value after deleting the last character of `value`
    pub fn pop_char(value: &str) -> String {
        let mut next = value.to_string();
        next.pop();
        next
    }

    /// Text to render: the value, or the placeholder when empty and
    /// not being edited
    pub fn display_value<'a>(&self, value: &'a str, is_active: bool) -> (&'a str, bool) {
        if value.is_empty() && !is_active {
            (self.placeholder, true)
        } else {
            (value, false)
        }
    }
}
