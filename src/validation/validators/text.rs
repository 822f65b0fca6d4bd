//! Character-level sanitization functions

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::types::{CaseMode, CharacterClass, LanguageSet, ValidationError};

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("Failed to compile alphanumeric regex"));
static NON_ALPHANUMERIC_OR_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").expect("Failed to compile alphanumeric regex"));
static NON_ALPHA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z]").expect("Failed to compile alpha regex"));
static NON_ALPHA_OR_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z ]").expect("Failed to compile alpha regex"));
// ASCII digits only: `\d` would also keep other decimal scripts.
static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("Failed to compile numeric regex"));
static NON_NUMERIC_OR_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9 ]").expect("Failed to compile numeric regex"));

static OUTSIDE_ENGLISH: Lazy<Regex> = Lazy::new(|| negated_class(&LanguageSet::English));
static OUTSIDE_SPANISH: Lazy<Regex> = Lazy::new(|| negated_class(&LanguageSet::Spanish));
static OUTSIDE_FRENCH: Lazy<Regex> = Lazy::new(|| negated_class(&LanguageSet::French));

fn negated_class(set: &LanguageSet) -> Regex {
    compile_negated(set.character_class()).expect("Failed to compile language set regex")
}

/// Compiles `[^body]`, reporting an unusable body as an invalid pattern
fn compile_negated(body: &str) -> Result<Regex, ValidationError> {
    Regex::new(&format!("[^{body}]")).map_err(|_| ValidationError::InvalidPattern {
        pattern: body.to_string(),
    })
}

/// Applies the requested case transform
pub fn transform_case(value: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::None => value.to_string(),
        CaseMode::Upper => value.to_uppercase(),
        CaseMode::Lower => value.to_lowercase(),
    }
}

/// Keeps only the characters belonging to the given language set
pub fn filter_language_set(value: &str, set: &LanguageSet) -> Result<String, ValidationError> {
    let stripped = match set {
        LanguageSet::English => OUTSIDE_ENGLISH.replace_all(value, ""),
        LanguageSet::Spanish => OUTSIDE_SPANISH.replace_all(value, ""),
        LanguageSet::French => OUTSIDE_FRENCH.replace_all(value, ""),
        LanguageSet::Custom(body) => {
            if body.is_empty() {
                return Ok(value.to_string());
            }
            return Ok(compile_negated(body)?.replace_all(value, "").into_owned());
        }
    };
    Ok(stripped.into_owned())
}

/// Strips every character outside the allowed set of `class`.
///
/// Format classes (`email`, `url`, `tel`) leave the value untouched. The
/// `pattern` class interprets `custom_pattern` as a character-class body and
/// does nothing when it is absent or empty.
pub fn filter_characters(
    value: &str,
    class: CharacterClass,
    accept_space: bool,
    custom_pattern: Option<&str>,
) -> Result<String, ValidationError> {
    let regex: &Regex = match (class, accept_space) {
        (CharacterClass::Alphanumeric, false) => &*NON_ALPHANUMERIC,
        (CharacterClass::Alphanumeric, true) => &*NON_ALPHANUMERIC_OR_SPACE,
        (CharacterClass::Alpha, false) => &*NON_ALPHA,
        (CharacterClass::Alpha, true) => &*NON_ALPHA_OR_SPACE,
        (CharacterClass::Numeric, false) => &*NON_NUMERIC,
        (CharacterClass::Numeric, true) => &*NON_NUMERIC_OR_SPACE,
        (CharacterClass::Pattern, _) => {
            return match custom_pattern.filter(|body| !body.is_empty()) {
                Some(body) => Ok(compile_negated(body)?.replace_all(value, "").into_owned()),
                None => Ok(value.to_string()),
            };
        }
        (CharacterClass::Email | CharacterClass::Url | CharacterClass::Tel, _) => {
            return Ok(value.to_string());
        }
    };

    Ok(regex.replace_all(value, "").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alphanumeric_filter() {
        let cases = vec![
            ("Test 123!@#", false, "Test123"),
            ("Test 123!@#", true, "Test 123"),
            ("ça va?", false, "ava"),
            ("", false, ""),
        ];

        for (input, accept_space, expected) in cases {
            let result =
                filter_characters(input, CharacterClass::Alphanumeric, accept_space, None).unwrap();
            assert_eq!(result, expected, "Unexpected result for input: {}", input);
        }
    }

    #[test]
    fn test_alpha_filter() {
        assert_eq!(
            filter_characters("R2-D2 rocks", CharacterClass::Alpha, false, None).unwrap(),
            "RDrocks"
        );
        assert_eq!(
            filter_characters("R2-D2 rocks", CharacterClass::Alpha, true, None).unwrap(),
            "RD rocks"
        );
    }

    #[test]
    fn test_numeric_filter_is_ascii_only() {
        assert_eq!(
            filter_characters("+41 (0)79 123", CharacterClass::Numeric, false, None).unwrap(),
            "41079123"
        );
        assert_eq!(
            filter_characters("12 34", CharacterClass::Numeric, true, None).unwrap(),
            "12 34"
        );
        // Arabic-indic digits are not kept
        assert_eq!(
            filter_characters("٣4٥6", CharacterClass::Numeric, false, None).unwrap(),
            "46"
        );
    }

    #[test]
    fn test_pattern_filter() {
        assert_eq!(
            filter_characters("123abc", CharacterClass::Pattern, false, Some("a-zA-Z")).unwrap(),
            "abc"
        );
        assert_eq!(
            filter_characters("123abc", CharacterClass::Pattern, false, None).unwrap(),
            "123abc"
        );
        assert_eq!(
            filter_characters("123abc", CharacterClass::Pattern, false, Some("")).unwrap(),
            "123abc"
        );
    }

    #[test]
    fn test_pattern_filter_rejects_broken_body() {
        let result = filter_characters("abc", CharacterClass::Pattern, false, Some("z-a"));
        assert_eq!(
            result,
            Err(ValidationError::InvalidPattern {
                pattern: "z-a".to_string()
            })
        );
    }

    #[test]
    fn test_format_classes_leave_value_untouched() {
        for class in [CharacterClass::Email, CharacterClass::Url, CharacterClass::Tel] {
            assert_eq!(
                filter_characters("a b@c!", class, false, None).unwrap(),
                "a b@c!",
                "Format class {} must not rewrite the value",
                class
            );
        }
    }

    #[test]
    fn test_case_transform() {
        assert_eq!(transform_case("MiXeD", CaseMode::Upper), "MIXED");
        assert_eq!(transform_case("MiXeD", CaseMode::Lower), "mixed");
        assert_eq!(transform_case("MiXeD", CaseMode::None), "MiXeD");
    }

    #[test]
    fn test_language_sets() {
        let cases = vec![
            ("tëst", LanguageSet::English, "tst"),
            ("tëst", LanguageSet::French, "tëst"),
            ("canción", LanguageSet::Spanish, "canción"),
            ("canción", LanguageSet::English, "cancin"),
            ("garçon!", LanguageSet::French, "garçon"),
            ("abc123", LanguageSet::from("a-c"), "abc"),
        ];

        for (input, set, expected) in cases {
            let result = filter_language_set(input, &set).unwrap();
            assert_eq!(result, expected, "Unexpected result for {} with {:?}", input, set);
        }
    }

    #[test]
    fn test_invalid_custom_language_set() {
        let result = filter_language_set("abc", &LanguageSet::from("z-a"));
        assert!(matches!(result, Err(ValidationError::InvalidPattern { .. })));
    }

    proptest! {
        #[test]
        fn numeric_filter_keeps_digits_in_order(input in "\\PC*") {
            let filtered = filter_characters(&input, CharacterClass::Numeric, false, None).unwrap();
            let expected: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(&filtered, &expected);
        }

        #[test]
        fn numeric_filter_is_idempotent(input in "\\PC*") {
            let once = filter_characters(&input, CharacterClass::Numeric, false, None).unwrap();
            let twice = filter_characters(&once, CharacterClass::Numeric, false, None).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
