//! Wizard steps

use crate::schema::FieldName;

/// One of the four sequential pages of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Step {
    #[default]
    PersonalInfo,
    ContactInfo,
    Categories,
    Review,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::PersonalInfo,
        Step::ContactInfo,
        Step::Categories,
        Step::Review,
    ];

    /// 1-based position of the step
    pub fn index(&self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::ContactInfo => 2,
            Self::Categories => 3,
            Self::Review => 4,
        }
    }

    /// Step at a 1-based position; None outside 1..=4
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            1 => Some(Self::PersonalInfo),
            2 => Some(Self::ContactInfo),
            3 => Some(Self::Categories),
            4 => Some(Self::Review),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::ContactInfo => "Contact Info",
            Self::Categories => "Categories",
            Self::Review => "Review",
        }
    }

    /// Fields that must be valid before leaving this step forward
    pub fn fields(&self) -> &'static [FieldName] {
        match self {
            Self::PersonalInfo => &[FieldName::Name, FieldName::Email],
            Self::ContactInfo => &[FieldName::Address, FieldName::Phone],
            Self::Categories => &[FieldName::Categories],
            Self::Review => &[],
        }
    }

    /// Step that owns a field
    pub fn owning(field: FieldName) -> Self {
        match field {
            FieldName::Name | FieldName::Email => Self::PersonalInfo,
            FieldName::Address | FieldName::Phone => Self::ContactInfo,
            FieldName::Categories => Self::Categories,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(i64::from(self.index()) + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_index(i64::from(self.index()) - 1)
    }

    pub fn is_first(&self) -> bool {
        self.previous().is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}
