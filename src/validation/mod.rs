//! Root module for the validation system.
//! Exposes the field, file and selection validators and their types.

mod constants;
mod field;
mod file;
mod selection;
mod types;
pub mod validators;

// Re-export commonly used types and functions
pub use constants::*;
pub use field::evaluate;
pub use file::{validate_files, FileConstraintValidator};
pub use selection::{Selection, SelectionChange, SelectorOption};
pub use types::{
    CaseMode, CharacterClass, ErrorKind, FieldConfig, FileConstraintConfig, FileDescriptor,
    FileRejection, FileValidationOutcome, LanguageSet, ValidationError, ValidationResult,
};
