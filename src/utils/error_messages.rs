//! Display messages for reported errors

use std::collections::BTreeMap;

use crate::validation::{ErrorKind, ValidationError};

/// Message used when a key has neither an override nor a default
pub const FALLBACK_MESSAGE: &str = "Invalid input.";

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("required", "This field is required."),
    ("minlength", "The value is too short."),
    ("maxlength", "The value is too long."),
    ("email", "Please enter a valid email address."),
    ("pattern", "The value does not match the required pattern."),
    ("min", "The value is too low."),
    ("max", "The value is too high."),
    ("strictEmail", "Please enter a valid email address."),
    ("strictUrl", "Please enter a valid URL."),
    ("strictTel", "Please enter a valid phone number."),
    ("invalidType", "This file type is not allowed."),
    ("maxSize", "The file is too large."),
    ("maxFiles", "Too many files selected."),
    ("maxWidth", "The image is too wide."),
    ("maxHeight", "The image is too tall."),
    ("invalidImage", "The file is not a valid image."),
    ("maxSelection", "Too many options selected."),
];

/// Resolves error keys to display text: custom overrides first, then the
/// built-in defaults, then [`FALLBACK_MESSAGE`].
#[derive(Debug, Clone, Default)]
pub struct ErrorMessages {
    custom: BTreeMap<String, String>,
}

impl ErrorMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_messages(custom: BTreeMap<String, String>) -> Self {
        Self { custom }
    }

    pub fn with_message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.custom.insert(key.into(), message.into());
        self
    }

    pub fn message_for_key(&self, key: &str) -> &str {
        if let Some(message) = self.custom.get(key) {
            return message;
        }
        DEFAULT_MESSAGES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, message)| *message)
            .unwrap_or(FALLBACK_MESSAGE)
    }

    pub fn message_for(&self, kind: ErrorKind) -> &str {
        self.message_for_key(kind.as_ref())
    }

    /// Renders one message per reported error, in key order
    pub fn messages_for(&self, errors: &BTreeMap<ErrorKind, ValidationError>) -> Vec<String> {
        errors
            .keys()
            .map(|kind| self.message_for(*kind).to_string())
            .collect()
    }
}
