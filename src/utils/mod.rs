//! Presentation helpers shared by hosts of the validation engine

pub mod error_messages;
pub mod format;

pub use error_messages::ErrorMessages;
pub use format::{describe_mime_types, format_file_size};
