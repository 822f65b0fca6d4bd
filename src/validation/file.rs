//! File constraint validation

use futures::future::join_all;
use log::debug;
use tokio::runtime::Handle;

use super::types::{FileConstraintConfig, FileDescriptor, FileValidationOutcome, ValidationError};
use super::validators::file as file_validators;

/// Validates batches of files against a fixed set of constraints.
///
/// Each call owns its input and builds its own outcome, so overlapping calls
/// (a new selection made while an earlier one is still decoding) can never
/// see each other's results. Image decoding runs on Tokio's blocking pool when
/// a Tokio runtime is available, and inline on the calling task otherwise.
#[derive(Debug, Clone, Default)]
pub struct FileConstraintValidator {
    config: FileConstraintConfig,
}

impl FileConstraintValidator {
    pub fn new(config: FileConstraintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FileConstraintConfig {
        &self.config
    }

    /// Validates `files` and returns the accepted subset, in input order
    pub async fn validate(&self, files: Vec<FileDescriptor>) -> FileValidationOutcome {
        validate_files(files, &self.config).await
    }
}

/// Validates a batch of files.
///
/// A batch larger than `max_files` is rejected as a whole. Otherwise every file
/// is checked on its own (type, then size, then image dimensions), stopping at
/// its first failure; the remaining files are still processed.
pub async fn validate_files(
    files: Vec<FileDescriptor>,
    config: &FileConstraintConfig,
) -> FileValidationOutcome {
    if files.len() > config.max_files {
        debug!(
            "Rejecting batch of {} files (limit {})",
            files.len(),
            config.max_files
        );
        return FileValidationOutcome::batch_rejected(ValidationError::MaxFiles {
            actual: files.len(),
            max_allowed: config.max_files,
        });
    }

    let checks = files.into_iter().map(|file| async move {
        let verdict = check_file(&file, config).await;
        (file, verdict)
    });

    let mut outcome = FileValidationOutcome::default();
    for (file, verdict) in join_all(checks).await {
        match verdict {
            Ok(()) => outcome.accept(file),
            Err(e) => {
                debug!("Rejecting file `{}`: {}", file.name, e);
                outcome.reject(file.name, e);
            }
        }
    }
    outcome
}

async fn check_file(
    file: &FileDescriptor,
    config: &FileConstraintConfig,
) -> Result<(), ValidationError> {
    file_validators::validate_type(file, &config.accepted_types)?;
    file_validators::validate_file_size(file.size_bytes, config.max_file_size)?;

    if file.is_image() && (config.max_width.is_some() || config.max_height.is_some()) {
        let dimensions = resolve_dimensions(file).await?;
        file_validators::validate_image_dimensions(dimensions, config.max_width, config.max_height)?;
    }

    Ok(())
}

/// Known dimensions win; otherwise the header is decoded off the async path
async fn resolve_dimensions(file: &FileDescriptor) -> Result<(u32, u32), ValidationError> {
    if let Some(dimensions) = file.dimensions {
        return Ok(dimensions);
    }

    let content = file
        .content
        .clone()
        .ok_or_else(|| ValidationError::InvalidImage {
            reason: "no image data available".to_string(),
        })?;

    match Handle::try_current() {
        Ok(handle) => handle
            .spawn_blocking(move || file_validators::read_image_dimensions(&content))
            .await
            .map_err(|e| ValidationError::InvalidImage {
                reason: e.to_string(),
            })?,
        Err(_) => {
            debug!("No Tokio runtime, decoding `{}` inline", file.name);
            file_validators::read_image_dimensions(&content)
        }
    }
}
