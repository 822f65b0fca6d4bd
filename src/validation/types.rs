//! Core types used throughout the validation system

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

use super::constants::{
    DEFAULT_ACCEPTED_TYPE, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE, ENGLISH_CHARACTERS,
    FRENCH_CHARACTERS, SPANISH_CHARACTERS,
};

/// Every mode a field can be evaluated against.
///
/// `Alphanumeric`, `Alpha`, `Numeric` and `Pattern` rewrite the value and never
/// report errors. `Email`, `Url` and `Tel` leave the value untouched and only
/// report whether it has the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CharacterClass {
    Alphanumeric,
    Alpha,
    Numeric,
    Email,
    Url,
    Tel,
    Pattern,
}

impl CharacterClass {
    /// Whether this class sanitizes the value rather than checking its format
    pub fn is_transforming(self) -> bool {
        matches!(
            self,
            CharacterClass::Alphanumeric
                | CharacterClass::Alpha
                | CharacterClass::Numeric
                | CharacterClass::Pattern
        )
    }
}

/// Case transform applied before any filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    #[default]
    None,
    #[serde(alias = "uppercase")]
    Upper,
    #[serde(alias = "lowercase")]
    Lower,
}

/// A named set of allowed characters, or a raw character-class body when the
/// name is not one of the predefined codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageSet {
    English,
    Spanish,
    French,
    Custom(String),
}

impl LanguageSet {
    /// The character-class body (the part between `[` and `]`) of this set
    pub fn character_class(&self) -> &str {
        match self {
            LanguageSet::English => ENGLISH_CHARACTERS,
            LanguageSet::Spanish => SPANISH_CHARACTERS,
            LanguageSet::French => FRENCH_CHARACTERS,
            LanguageSet::Custom(body) => body,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            LanguageSet::English => "en",
            LanguageSet::Spanish => "es",
            LanguageSet::French => "fr",
            LanguageSet::Custom(body) => body,
        }
    }
}

impl From<&str> for LanguageSet {
    fn from(code: &str) -> Self {
        match code {
            "en" => LanguageSet::English,
            "es" => LanguageSet::Spanish,
            "fr" => LanguageSet::French,
            other => LanguageSet::Custom(other.to_string()),
        }
    }
}

impl From<String> for LanguageSet {
    fn from(code: String) -> Self {
        LanguageSet::from(code.as_str())
    }
}

impl From<LanguageSet> for String {
    fn from(set: LanguageSet) -> Self {
        set.code().to_string()
    }
}

/// Configuration of a single field evaluation.
///
/// `modes` are applied in order, so a sanitizing class can be followed by a
/// format check (`FieldConfig::new("alphanumeric").then("email")`). Mode names
/// are kept as written by the caller and parsed at evaluation time; an unknown
/// name is reported as [`ErrorKind::UnsupportedMode`].
///
/// When deserialized, unknown keys are refused and `mode` is accepted for
/// `modes`, holding either one name or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(alias = "mode", deserialize_with = "one_or_many")]
    pub modes: Vec<String>,
    pub accept_space: bool,
    #[serde(rename = "case")]
    pub case_mode: CaseMode,
    pub language_set: Option<LanguageSet>,
    pub custom_pattern: Option<String>,
    pub normalize_unicode: bool,
}

impl FieldConfig {
    /// Creates a configuration evaluating a single mode
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            modes: vec![mode.into()],
            ..Self::default()
        }
    }

    /// Appends another mode, evaluated after the previous ones
    pub fn then(mut self, mode: impl Into<String>) -> Self {
        self.modes.push(mode.into());
        self
    }

    pub fn with_space(mut self, accept_space: bool) -> Self {
        self.accept_space = accept_space;
        self
    }

    pub fn with_case(mut self, case_mode: CaseMode) -> Self {
        self.case_mode = case_mode;
        self
    }

    pub fn with_language_set(mut self, set: impl Into<LanguageSet>) -> Self {
        self.language_set = Some(set.into());
        self
    }

    /// Sets the character-class body used by the `pattern` mode (e.g. `a-zA-Z`)
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.custom_pattern = Some(pattern.into());
        self
    }

    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(mode) => vec![mode],
        OneOrMany::Many(modes) => modes,
    })
}

/// Flat taxonomy of everything the engine can report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ErrorKind {
    UnsupportedMode,
    MissingMode,
    InvalidPattern,
    StrictEmail,
    StrictUrl,
    StrictTel,
    InvalidType,
    MaxSize,
    MaxFiles,
    MaxWidth,
    MaxHeight,
    InvalidImage,
    MaxSelection,
}

impl ErrorKind {
    /// Kinds signalling a misconfigured caller rather than bad user input
    pub fn is_caller_error(self) -> bool {
        matches!(
            self,
            ErrorKind::UnsupportedMode | ErrorKind::MissingMode | ErrorKind::InvalidPattern
        )
    }
}

/// A reported problem together with its detail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ValidationError {
    #[error("unsupported mode `{mode}`")]
    UnsupportedMode { mode: String },

    #[error("no mode or language set configured")]
    MissingMode,

    #[error("invalid character class `{pattern}`")]
    InvalidPattern { pattern: String },

    #[error("invalid email address")]
    StrictEmail,

    #[error("invalid URL")]
    StrictUrl,

    #[error("invalid telephone number")]
    StrictTel,

    #[error("file type `{file_type}` is not one of `{allowed_types}`")]
    InvalidType {
        file_type: String,
        allowed_types: String,
    },

    #[error("file size of {file_size} bytes exceeds maximum of {max_size} bytes")]
    MaxSize { file_size: u64, max_size: u64 },

    #[error("{actual} files selected, at most {max_allowed} allowed")]
    MaxFiles { actual: usize, max_allowed: usize },

    #[error("image width of {width}px exceeds maximum of {max_width}px")]
    MaxWidth { width: u32, max_width: u32 },

    #[error("image height of {height}px exceeds maximum of {max_height}px")]
    MaxHeight { height: u32, max_height: u32 },

    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("{actual} options selected, at most {max_allowed} allowed")]
    MaxSelection { actual: usize, max_allowed: usize },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::UnsupportedMode { .. } => ErrorKind::UnsupportedMode,
            ValidationError::MissingMode => ErrorKind::MissingMode,
            ValidationError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            ValidationError::StrictEmail => ErrorKind::StrictEmail,
            ValidationError::StrictUrl => ErrorKind::StrictUrl,
            ValidationError::StrictTel => ErrorKind::StrictTel,
            ValidationError::InvalidType { .. } => ErrorKind::InvalidType,
            ValidationError::MaxSize { .. } => ErrorKind::MaxSize,
            ValidationError::MaxFiles { .. } => ErrorKind::MaxFiles,
            ValidationError::MaxWidth { .. } => ErrorKind::MaxWidth,
            ValidationError::MaxHeight { .. } => ErrorKind::MaxHeight,
            ValidationError::InvalidImage { .. } => ErrorKind::InvalidImage,
            ValidationError::MaxSelection { .. } => ErrorKind::MaxSelection,
        }
    }
}

/// Outcome of evaluating one field value.
///
/// Built fresh on every evaluation; it cannot be modified once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub(crate) sanitized_value: String,
    pub(crate) errors: BTreeMap<ErrorKind, ValidationError>,
}

impl ValidationResult {
    pub fn sanitized_value(&self) -> &str {
        &self.sanitized_value
    }

    pub fn errors(&self) -> &BTreeMap<ErrorKind, ValidationError> {
        &self.errors
    }

    /// The set of reported kinds, without their detail
    pub fn error_kinds(&self) -> BTreeSet<ErrorKind> {
        self.errors.keys().copied().collect()
    }

    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.contains_key(&kind)
    }

    /// True when the configuration itself was at fault
    pub fn has_caller_error(&self) -> bool {
        self.errors.keys().any(|kind| kind.is_caller_error())
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_value(self) -> String {
        self.sanitized_value
    }
}

/// A file as handed over by the host: metadata, and optionally its bytes or
/// already-known pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub dimensions: Option<(u32, u32)>,
    #[serde(skip)]
    pub content: Option<Arc<[u8]>>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            dimensions: None,
            content: None,
        }
    }

    /// Describes a file from its full content; the size is taken from the bytes
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: content.len() as u64,
            dimensions: None,
            content: Some(content),
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    pub fn is_image(&self) -> bool {
        self.mime_type
            .split_once('/')
            .is_some_and(|(top, _)| top.eq_ignore_ascii_case("image"))
    }
}

/// Constraints applied to a batch of files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FileConstraintConfig {
    pub accepted_types: Vec<String>,
    pub max_file_size: u64,
    pub max_files: usize,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl Default for FileConstraintConfig {
    fn default() -> Self {
        Self {
            accepted_types: vec![DEFAULT_ACCEPTED_TYPE.to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            max_width: None,
            max_height: None,
        }
    }
}

impl FileConstraintConfig {
    /// Builds a configuration from an HTML `accept` attribute value
    /// (e.g. `image/*, application/pdf`)
    pub fn from_accept(accept: &str) -> Self {
        Self {
            accepted_types: accept
                .split(',')
                .map(str::trim)
                .filter(|matcher| !matcher.is_empty())
                .map(str::to_string)
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_max_files(mut self, count: usize) -> Self {
        self.max_files = count;
        self
    }

    pub fn with_max_dimensions(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }
}

/// A file excluded from the accepted list, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRejection {
    pub file_name: String,
    pub error: ValidationError,
}

/// Result of validating one batch of files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileValidationOutcome {
    pub(crate) accepted_files: Vec<FileDescriptor>,
    pub(crate) errors: BTreeMap<ErrorKind, ValidationError>,
    pub(crate) rejections: Vec<FileRejection>,
}

impl FileValidationOutcome {
    pub(crate) fn batch_rejected(error: ValidationError) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(error.kind(), error);
        Self {
            errors,
            ..Self::default()
        }
    }

    pub(crate) fn accept(&mut self, file: FileDescriptor) {
        self.accepted_files.push(file);
    }

    pub(crate) fn reject(&mut self, file_name: String, error: ValidationError) {
        // Several files can fail with the same kind; the latest detail is kept.
        self.errors.insert(error.kind(), error.clone());
        self.rejections.push(FileRejection { file_name, error });
    }

    /// Files that passed every check, in input order
    pub fn accepted_files(&self) -> &[FileDescriptor] {
        &self.accepted_files
    }

    pub fn errors(&self) -> &BTreeMap<ErrorKind, ValidationError> {
        &self.errors
    }

    pub fn rejections(&self) -> &[FileRejection] {
        &self.rejections
    }

    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.contains_key(&kind)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_ignores_case() {
        let cases = vec![
            ("image/png", true),
            ("IMAGE/PNG", true),
            ("Image/Jpeg", true),
            ("application/pdf", false),
            ("imagery/png", false),
            ("image", false),
        ];

        for (mime_type, expected) in cases {
            assert_eq!(
                FileDescriptor::new("f", mime_type, 1).is_image(),
                expected,
                "Unexpected verdict for {}",
                mime_type
            );
        }
    }

    #[test]
    fn test_field_config_mode_forms() {
        let single: FieldConfig = serde_yaml::from_str("mode: email").unwrap();
        assert_eq!(single.modes, vec!["email".to_string()]);

        let list: FieldConfig = serde_yaml::from_str("mode: [alpha, email]").unwrap();
        assert_eq!(list.modes, vec!["alpha".to_string(), "email".to_string()]);

        let plural: FieldConfig = serde_yaml::from_str("modes: tel").unwrap();
        assert_eq!(plural.modes, vec!["tel".to_string()]);
    }

    #[test]
    fn test_unknown_keys_are_refused() {
        assert!(serde_yaml::from_str::<FieldConfig>("modes: [alpha]\nacceptspace: true").is_err());
        assert!(serde_yaml::from_str::<FileConstraintConfig>("maxSize: 10").is_err());
    }
}
