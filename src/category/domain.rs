//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, validate_text};

/// The maximum number of characters in a category name.
pub const CATEGORY_NAME_MAX_LENGTH: usize = 100;

/// A validated category name: non-empty and at most [CATEGORY_NAME_MAX_LENGTH] characters.
///
/// Names do not need to be unique.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [FieldError::Required] if `name` is blank, or
    /// [FieldError::TooLong] if it has more than [CATEGORY_NAME_MAX_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, FieldError> {
        validate_text(name, CATEGORY_NAME_MAX_LENGTH, true).map(Self)
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty and not too long.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the invariants are violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A named grouping for email templates (e.g., 'Company Introductions').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
}

/// Form data for category creation and editing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
}
