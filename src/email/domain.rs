//! Core email domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    category::CategoryId,
    validation::{FieldError, validate_text},
};

/// The maximum number of characters in either email name.
pub const EMAIL_NAME_MAX_LENGTH: usize = 100;

/// A validated email name: non-empty and at most [EMAIL_NAME_MAX_LENGTH] characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct EmailName(String);

impl EmailName {
    /// Create an email name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [FieldError::Required] if `name` is blank, or
    /// [FieldError::TooLong] if it has more than [EMAIL_NAME_MAX_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, FieldError> {
        validate_text(name, EMAIL_NAME_MAX_LENGTH, true).map(Self)
    }

    /// Create an email name without validation.
    ///
    /// The caller should ensure that the string is not empty and not too long.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for EmailName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for EmailName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for an email.
pub type EmailId = i64;

/// An email template, named in English and Spanish and optionally grouped
/// into a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: EmailId,
    pub name_eng: EmailName,
    pub name_esp: EmailName,
    /// Cleared if the category is ever removed from the store.
    pub category_id: Option<CategoryId>,
}

/// The validated fields of an email, without an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmail {
    pub name_eng: EmailName,
    pub name_esp: EmailName,
    pub category_id: Option<CategoryId>,
}

/// The raw data submitted by the create and update email forms.
///
/// The translation slots arrive as three parallel lists, one entry per slot.
/// Every field defaults to empty so that a missing field is reported as a
/// validation error instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailFormData {
    pub name_eng: String,
    pub name_esp: String,
    /// The selected category ID, or empty for no category.
    pub category_id: String,
    pub translation_id: Vec<String>,
    pub language: Vec<String>,
    pub content: Vec<String>,
    /// The IDs of the existing translations whose delete box is ticked.
    pub delete: Vec<String>,
}
