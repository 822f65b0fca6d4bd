//! Whole-string format checks

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::types::{CharacterClass, ValidationError};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})[/a-zA-Z0-9_ .-]*/?$")
        .expect("Failed to compile url regex")
});

static TEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\+?([0-9]{1,3})?[-.\s]?(\(?[0-9]{1,4}\)?)?[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,9}$",
    )
    .expect("Failed to compile telephone regex")
});

/// Checks `value` against the format of `class`.
///
/// An empty value always passes: whether a field is required is decided
/// elsewhere. Non-format classes always pass.
pub fn validate_format(value: &str, class: CharacterClass) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    match class {
        CharacterClass::Email if !EMAIL_REGEX.is_match(value) => Err(ValidationError::StrictEmail),
        CharacterClass::Url if !URL_REGEX.is_match(value) => Err(ValidationError::StrictUrl),
        CharacterClass::Tel if !TEL_REGEX.is_match(value) => Err(ValidationError::StrictTel),
        _ => Ok(()),
    }
}

/// Boolean form of [`validate_format`]
pub fn is_valid_format(value: &str, class: CharacterClass) -> bool {
    validate_format(value, class).is_ok()
}
