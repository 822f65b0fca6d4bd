//! Field rule evaluation

use std::collections::BTreeMap;

use log::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use super::types::{CharacterClass, ErrorKind, FieldConfig, ValidationError, ValidationResult};
use super::validators::format as format_validators;
use super::validators::text as text_validators;

/// Evaluates a raw field value against its configuration.
///
/// Steps run in a fixed order: optional Unicode normalization, case transform,
/// language-set filter, then every configured mode in sequence. Sanitizing
/// modes rewrite the value, format modes only report. Caller mistakes (an
/// unknown mode, an unusable character class, no rule at all) are reported
/// alongside the validation errors and the offending step is skipped.
pub fn evaluate(raw: &str, config: &FieldConfig) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if config.modes.is_empty() && config.language_set.is_none() {
        warn!("Field has no mode and no language set; nothing to check");
        record(&mut errors, ValidationError::MissingMode);
    }

    let normalized = if config.normalize_unicode {
        raw.nfc().collect::<String>()
    } else {
        raw.to_string()
    };

    let mut value = text_validators::transform_case(&normalized, config.case_mode);

    if let Some(set) = &config.language_set {
        match text_validators::filter_language_set(&value, set) {
            Ok(filtered) => value = filtered,
            Err(e) => {
                warn!("Ignoring language set `{}`: {}", set.code(), e);
                record(&mut errors, e);
            }
        }
    }

    for mode in &config.modes {
        let class = match mode.trim().parse::<CharacterClass>() {
            Ok(class) => class,
            Err(_) => {
                warn!(
                    "Invalid mode `{}`. Allowed modes are: alphanumeric, numeric, alpha, email, url, tel, pattern",
                    mode
                );
                record(
                    &mut errors,
                    ValidationError::UnsupportedMode { mode: mode.clone() },
                );
                continue;
            }
        };

        if class.is_transforming() {
            match text_validators::filter_characters(
                &value,
                class,
                config.accept_space,
                config.custom_pattern.as_deref(),
            ) {
                Ok(filtered) => value = filtered,
                Err(e) => {
                    warn!("Skipping `{}` filter: {}", class, e);
                    record(&mut errors, e);
                }
            }
        } else if let Err(e) = format_validators::validate_format(&value, class) {
            debug!("Value failed `{}` format check", class);
            record(&mut errors, e);
        }
    }

    ValidationResult {
        sanitized_value: value,
        errors,
    }
}

fn record(errors: &mut BTreeMap<ErrorKind, ValidationError>, error: ValidationError) {
    errors.insert(error.kind(), error);
}
