//! Validation of submitted HTML forms.
//!
//! Each form type deserializes leniently (every field is a string and may be
//! missing), then `validate` trims and coerces the raw values into a typed
//! input checked with `validator`. Failures come back as an ordered
//! [`FormErrors`] list for re-rendering, never as a request rejection.

use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

pub mod category;
pub mod item;

pub use category::{CategoryForm, CategoryInput};
pub use item::{ItemForm, ItemInput, UpdateItemForm};

/// Shortest accepted name or description, in characters.
pub const MIN_TEXT_LEN: usize = 3;
/// Longest accepted name or description, in characters.
pub const MAX_TEXT_LEN: usize = 255;

/// One failed rule on one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field errors in the order the fields appear on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    /// First message recorded for `field`.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Every message recorded for `field`, in insertion order.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Message for a name/description whose trimmed length is out of bounds.
pub(crate) fn length_message(label: &str, value: &str) -> String {
    if value.chars().count() < MIN_TEXT_LEN {
        format!("{} must have at least {} characters", label, MIN_TEXT_LEN)
    } else {
        format!("{} must have at most {} characters", label, MAX_TEXT_LEN)
    }
}

/// Message of the first `validator` failure on `field`, if any.
pub(crate) fn first_failure(errors: &ValidationErrors, field: &str) -> Option<String> {
    match errors.errors().get(field) {
        Some(ValidationErrorsKind::Field(failures)) => failures.first().map(|failure| {
            failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| failure.code.to_string())
        }),
        _ => None,
    }
}

/// Trimmed copy of a raw form value.
pub(crate) fn clean(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_message_picks_the_violated_bound() {
        assert_eq!(
            length_message("Name", "ab"),
            "Name must have at least 3 characters"
        );
        assert_eq!(
            length_message("Description", &"x".repeat(300)),
            "Description must have at most 255 characters"
        );
    }

    #[test]
    fn form_errors_keep_insertion_order() {
        let mut errors = FormErrors::new();
        errors.add("name", "first");
        errors.add("price", "second");
        assert_eq!(errors.messages(), vec!["first", "second"]);
        assert_eq!(errors.for_field("price"), Some("second"));
        assert_eq!(errors.for_field("stock"), None);
        errors.add("price", "third");
        assert_eq!(errors.messages_for("price"), vec!["second", "third"]);
        assert!(errors.messages_for("stock").is_empty());
        assert_eq!(errors.clone().into_result(()), Err(errors));
        assert_eq!(FormErrors::new().into_result(5), Ok(5));
    }
}
