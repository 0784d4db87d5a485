//! The wizard record and its field/category enumerations

use serde::{Deserialize, Serialize};

/// Interest categories a user can pick on the categories step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Health,
    Finance,
    Education,
    Entertainment,
    Travel,
    Food,
    Sports,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Health,
        Category::Finance,
        Category::Education,
        Category::Entertainment,
        Category::Travel,
        Category::Food,
        Category::Sports,
    ];

    /// Stable identifier used in persisted data
    pub fn id(&self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Health => "health",
            Self::Finance => "finance",
            Self::Education => "education",
            Self::Entertainment => "entertainment",
            Self::Travel => "travel",
            Self::Food => "food",
            Self::Sports => "sports",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Health => "Health",
            Self::Finance => "Finance",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Travel => "Travel",
            Self::Food => "Food",
            Self::Sports => "Sports",
        }
    }

    /// Look up a category by its identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Names of the record fields, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Name,
    Email,
    Address,
    Phone,
    Categories,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Address,
        FieldName::Phone,
        FieldName::Categories,
    ];

    /// Key of the field in persisted JSON objects
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Categories => "categories",
        }
    }

    /// Form label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Address => "Address",
            Self::Phone => "Phone Number",
            Self::Categories => "Categories",
        }
    }

    /// Whether the field holds free text (everything but categories)
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Categories)
    }
}

/// The data collected by the wizard
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    /// Selected categories in selection order, without duplicates
    pub categories: Vec<Category>,
}

impl Record {
    /// Get the value of a text field (None for categories)
    pub fn text(&self, field: FieldName) -> Option<&str> {
        match field {
            FieldName::Name => Some(&self.name),
            FieldName::Email => Some(&self.email),
            FieldName::Address => Some(&self.address),
            FieldName::Phone => Some(&self.phone),
            FieldName::Categories => None,
        }
    }

    fn text_mut(&mut self, field: FieldName) -> Option<&mut String> {
        match field {
            FieldName::Name => Some(&mut self.name),
            FieldName::Email => Some(&mut self.email),
            FieldName::Address => Some(&mut self.address),
            FieldName::Phone => Some(&mut self.phone),
            FieldName::Categories => None,
        }
    }

    /// Replace a text field's value. Returns false for the categories field.
    pub fn set_text(&mut self, field: FieldName, value: String) -> bool {
        match self.text_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Select the category if unselected, otherwise deselect it.
    /// Returns whether the category is selected afterwards.
    pub fn toggle_category(&mut self, category: Category) -> bool {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
            false
        } else {
            self.categories.push(category);
            true
        }
    }

    /// Categories joined for display, e.g. "technology, health"
    pub fn categories_display(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.id())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Display value of any field
    pub fn display_value(&self, field: FieldName) -> String {
        match self.text(field) {
            Some(text) => text.to_string(),
            None => self.categories_display(),
        }
    }
}
