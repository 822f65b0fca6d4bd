//! Field sanitization and file constraint validation for form inputs.
//!
//! The engine is a set of pure functions called by a UI host: [`evaluate`]
//! sanitizes and checks a text field on every value change, and
//! [`FileConstraintValidator`] checks a selection of files. Results are plain
//! values the host renders however it likes.

pub mod config;
pub mod consts;
pub mod utils;
pub mod validation;

pub use config::FormsConfig;
pub use utils::{describe_mime_types, format_file_size, ErrorMessages};
pub use validation::{
    evaluate, validate_files, CaseMode, CharacterClass, ErrorKind, FieldConfig,
    FileConstraintConfig, FileConstraintValidator, FileDescriptor, FileRejection,
    FileValidationOutcome, LanguageSet, Selection, SelectionChange, SelectorOption,
    ValidationError, ValidationResult,
};
