//! Upload validation rules.
//!
//! Pure classification over file metadata the caller already has; the
//! validator never touches the filesystem. The caller updates the draft only
//! on `Ok` — a rejected file must not disturb a previously accepted one.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::draft::SourceFile;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Which MIME category the upload surface accepts.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AcceptedCategory {
    /// Declared MIME type must begin with `audio/`.
    #[default]
    Audio,
    /// No MIME restriction.
    Any,
}

/// Injected bounds for [`validate_upload`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct UploadConstraints {
    pub max_size_bytes: u64,
    pub accepted: AcceptedCategory,
}

impl Default for UploadConstraints {
    fn default() -> Self {
        Self {
            max_size_bytes: 100 * BYTES_PER_MB,
            accepted: AcceptedCategory::Audio,
        }
    }
}

impl UploadConstraints {
    /// Convert a megabyte count to bytes, saturating instead of overflowing
    /// so an absurd configured limit means "no effective bound" rather than
    /// wrapping to a tiny one.
    pub fn mb_to_bytes(max_mb: u64) -> u64 {
        max_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn with_max_mb(max_mb: u64) -> Self {
        Self {
            max_size_bytes: Self::mb_to_bytes(max_mb),
            ..Self::default()
        }
    }

    pub fn max_size_mb(&self) -> u64 {
        self.max_size_bytes / BYTES_PER_MB
    }
}

/// Why an upload was rejected. Display strings are user-facing copy and are
/// rendered verbatim in the error banner.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("File size must be less than {limit_mb}MB")]
    TooLarge { limit_mb: u64 },
    #[error("Please select an audio file")]
    NotAudio,
}

/// Validate a candidate file against the configured constraints.
///
/// Size is checked before MIME type, so an oversized non-audio file reports
/// the size limit.
pub fn validate_upload(
    file: &SourceFile,
    constraints: &UploadConstraints,
) -> Result<(), UploadError> {
    if file.size_bytes > constraints.max_size_bytes {
        return Err(UploadError::TooLarge {
            limit_mb: constraints.max_size_mb(),
        });
    }

    if constraints.accepted == AcceptedCategory::Audio && !file.mime_type.starts_with("audio/") {
        return Err(UploadError::NotAudio);
    }

    Ok(())
}
