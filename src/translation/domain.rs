//! Core translation domain types.

use std::fmt::Display;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::{email::EmailId, validation::FieldError};

/// The maximum number of characters in a translation's content.
pub const TRANSLATION_CONTENT_MAX_LENGTH: usize = 2000;

/// The languages a translation can be written in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    French,
    Spanish,
    German,
    Dutch,
    Italian,
}

impl Language {
    /// Every language in the order they are offered in forms.
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::French,
        Language::Spanish,
        Language::German,
        Language::Dutch,
        Language::Italian,
    ];

    /// The two letter code stored in the database and submitted by forms.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::French => "FR",
            Language::Spanish => "ES",
            Language::German => "DE",
            Language::Dutch => "NE",
            Language::Italian => "IT",
        }
    }

    /// The name shown to users.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::Dutch => "Dutch",
            Language::Italian => "Italian",
        }
    }

    /// Find the language for a form value.
    ///
    /// # Errors
    ///
    /// Returns [FieldError::Required] for a blank code and
    /// [FieldError::InvalidChoice] for a code outside [Language::ALL].
    pub fn from_code(code: &str) -> Result<Self, FieldError> {
        let code = code.trim();

        if code.is_empty() {
            return Err(FieldError::Required);
        }

        Self::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .ok_or_else(|| FieldError::InvalidChoice(code.to_owned()))
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ToSql for Language {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Language {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;

        Language::from_code(code).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// Database identifier for a translation.
pub type TranslationId = i64;

/// Language-specific body content bound to one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTranslation {
    pub id: TranslationId,
    /// Cleared if the email is ever removed from the store.
    pub email_id: Option<EmailId>,
    pub language: Language,
    pub content: String,
}
