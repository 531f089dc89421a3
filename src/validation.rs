//! Field-level validation shared by the category, email and translation forms.

use std::collections::BTreeMap;

/// Why a single form field was rejected.
///
/// The display strings are shown to the user next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field was empty (or only whitespace) but a value is needed.
    #[error("This field is required.")]
    Required,

    /// The field holds more characters than allowed.
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong {
        /// The maximum number of characters.
        max: usize,
        /// The number of characters submitted.
        actual: usize,
    },

    /// The value is not one of the options the field accepts.
    #[error("Select a valid choice. {0} is not one of the available choices.")]
    InvalidChoice(String),
}

/// The errors for a submitted form, keyed by field name.
///
/// Field names match the `name` attribute of the form inputs, except for
/// translation slots which use `translation-{index}-{field}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    /// Create an empty set of errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` against `field`, replacing any earlier error for that field.
    pub fn insert(&mut self, field: impl Into<String>, error: FieldError) {
        self.0.insert(field.into(), error);
    }

    /// Record the error of `result` against `field` and return the valid value, if any.
    pub fn check<T>(&mut self, field: impl Into<String>, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.insert(field, error);
                None
            }
        }
    }

    /// Get the error for `field`, if there is one.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// The error message for `field`, or an empty string.
    pub fn message(&self, field: &str) -> String {
        self.get(field)
            .map(|error| error.to_string())
            .unwrap_or_default()
    }

    /// Whether no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of fields with an error.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Validate a text field and return the trimmed value.
///
/// Lengths are counted in Unicode scalar values.
///
/// # Errors
///
/// Returns [FieldError::Required] if `required` is set and the trimmed text is
/// empty, or [FieldError::TooLong] if it is longer than `max_length`.
pub fn validate_text(raw: &str, max_length: usize, required: bool) -> Result<String, FieldError> {
    let text = raw.trim();

    if required && text.is_empty() {
        return Err(FieldError::Required);
    }

    let length = text.chars().count();
    if length > max_length {
        return Err(FieldError::TooLong {
            max: max_length,
            actual: length,
        });
    }

    Ok(text.to_owned())
}
