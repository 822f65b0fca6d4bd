//! File-specific validation functions

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::super::types::{FileDescriptor, ValidationError};

/// Checks a single accepted-type matcher against a file.
///
/// `*` and `*/*` accept anything, `type/*` matches on the MIME prefix, `.ext`
/// matches the file name extension; anything else must equal the MIME type.
/// All comparisons ignore ASCII case.
pub fn matches_accepted_type(file_name: &str, mime_type: &str, matcher: &str) -> bool {
    let matcher = matcher.trim();

    if matcher == "*" || matcher == "*/*" {
        return true;
    }

    if let Some(extension) = matcher.strip_prefix('.') {
        return Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    }

    if let Some(prefix) = matcher.strip_suffix("/*") {
        return mime_type
            .split_once('/')
            .is_some_and(|(top_level, _)| top_level.eq_ignore_ascii_case(prefix));
    }

    mime_type.eq_ignore_ascii_case(matcher)
}

/// Validates the file type against the accepted matchers.
/// An empty matcher list accepts every file.
pub fn validate_type(file: &FileDescriptor, accepted_types: &[String]) -> Result<(), ValidationError> {
    let mut matchers = accepted_types
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|matcher| !matcher.is_empty())
        .peekable();

    if matchers.peek().is_none() {
        return Ok(());
    }

    if matchers.any(|matcher| matches_accepted_type(&file.name, &file.mime_type, matcher)) {
        return Ok(());
    }

    Err(ValidationError::InvalidType {
        file_type: file.mime_type.clone(),
        allowed_types: accepted_types.join(","),
    })
}

/// Validates the declared file size
pub fn validate_file_size(size_bytes: u64, max_size: u64) -> Result<(), ValidationError> {
    if size_bytes > max_size {
        return Err(ValidationError::MaxSize {
            file_size: size_bytes,
            max_size,
        });
    }
    Ok(())
}

/// Validates image dimensions, width first
pub fn validate_image_dimensions(
    (width, height): (u32, u32),
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> Result<(), ValidationError> {
    if let Some(max_width) = max_width.filter(|&max| width > max) {
        return Err(ValidationError::MaxWidth { width, max_width });
    }
    if let Some(max_height) = max_height.filter(|&max| height > max) {
        return Err(ValidationError::MaxHeight { height, max_height });
    }
    Ok(())
}

/// Reads the pixel dimensions of an encoded image.
///
/// Only the header is decoded; the format is guessed from the content.
pub fn read_image_dimensions(content: &[u8]) -> Result<(u32, u32), ValidationError> {
    ImageReader::new(Cursor::new(content))
        .with_guessed_format()
        .map_err(|e| ValidationError::InvalidImage {
            reason: e.to_string(),
        })?
        .into_dimensions()
        .map_err(|e| ValidationError::InvalidImage {
            reason: e.to_string(),
        })
}
