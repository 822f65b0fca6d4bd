//! Leaf validation functions used by the field and file validators

pub mod file;
pub mod format;
pub mod text;
