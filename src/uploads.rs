// ABOUTME: Thumbnail upload policy and on-disk storage
// ABOUTME: Enforces the 5 MB limit and image type allow-list, then writes <uuid>.<ext> files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Thumbnail uploads
//!
//! Files are read fully into memory while the form is parsed and only written
//! once the rest of the form has validated. Replacing a thumbnail leaves the
//! previous file on disk.

use crate::constants::{limits, uploads};
use crate::errors::{AppError, AppResult};
use axum::extract::multipart::{Field, MultipartError};
use http::StatusCode;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// An image received in the `thumbnail` form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailUpload {
    /// Normalized MIME type
    pub content_type: String,
    /// File extension used on disk
    pub extension: &'static str,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

/// Map an allowed MIME type to its file extension
///
/// # Errors
///
/// Returns an upload error for any type outside the allow-list
pub fn allowed_extension(content_type: Option<&str>) -> AppResult<&'static str> {
    let mime = content_type
        .and_then(|raw| raw.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .unwrap_or_default();

    uploads::ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == mime)
        .map(|(_, extension)| *extension)
        .ok_or_else(|| AppError::invalid_upload(uploads::INVALID_FILE_TYPE))
}

/// Convert a multipart parsing failure, reporting body-limit overruns as an oversized file
pub fn multipart_error(error: &MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::invalid_upload(uploads::FILE_TOO_LARGE)
    } else {
        AppError::invalid_input(format!("Malformed multipart body: {}", error.body_text()))
    }
}

/// Read the thumbnail part, enforcing type and size as bytes arrive
///
/// Returns `None` for an empty part with no file name, which browsers send when
/// the file input was left blank.
///
/// # Errors
///
/// Returns an upload error for a disallowed type or an oversized file
pub async fn read_thumbnail(mut field: Field<'_>) -> AppResult<Option<ThumbnailUpload>> {
    let content_type = field.content_type().map(str::to_owned);
    let has_file_name = field.file_name().is_some_and(|name| !name.is_empty());

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(&e))? {
        if bytes.len() + chunk.len() > limits::MAX_THUMBNAIL_BYTES {
            return Err(AppError::invalid_upload(uploads::FILE_TOO_LARGE));
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() && !has_file_name {
        return Ok(None);
    }

    let extension = allowed_extension(content_type.as_deref())?;
    debug!(size = bytes.len(), extension, "Received thumbnail upload");
    Ok(Some(ThumbnailUpload {
        content_type: content_type.unwrap_or_default(),
        extension,
        bytes,
    }))
}

/// Writes thumbnails under the configured upload directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    directory: PathBuf,
}

impl UploadStore {
    /// Store files under `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Directory files are written to
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Create the directory if missing
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created
    pub async fn ensure_directory(&self) -> AppResult<()> {
        fs::create_dir_all(&self.directory).await.map_err(|e| {
            AppError::storage(format!(
                "Cannot create upload directory {}",
                self.directory.display()
            ))
            .with_source(e)
        })?;
        info!(directory = %self.directory.display(), "Upload directory ready");
        Ok(())
    }

    /// Write `upload` as `<uuid>.<ext>` and return its public URL path
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be written
    pub async fn save(&self, upload: &ThumbnailUpload) -> AppResult<String> {
        let file_name = format!("{}.{}", Uuid::new_v4(), upload.extension);
        let path = self.directory.join(&file_name);

        fs::write(&path, &upload.bytes).await.map_err(|e| {
            AppError::storage(format!("Cannot write thumbnail {}", path.display())).with_source(e)
        })?;

        info!(file = %file_name, size = upload.bytes.len(), "Stored thumbnail");
        Ok(format!("{}/{file_name}", uploads::PUBLIC_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_types_map_to_extensions() {
        assert_eq!(allowed_extension(Some("image/png")).unwrap(), "png");
        assert_eq!(allowed_extension(Some("IMAGE/JPEG")).unwrap(), "jpg");
        assert_eq!(allowed_extension(Some("image/svg+xml")).unwrap(), "svg");
        assert_eq!(
            allowed_extension(Some("image/webp; charset=binary")).unwrap(),
            "webp"
        );
    }

    #[test]
    fn test_disallowed_types_are_rejected() {
        let err = allowed_extension(Some("image/gif")).unwrap_err();
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.message, uploads::INVALID_FILE_TYPE);
        assert!(allowed_extension(None).is_err());
    }

    #[tokio::test]
    async fn test_save_writes_uuid_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let url = store
            .save(&ThumbnailUpload {
                content_type: "image/png".to_owned(),
                extension: "png",
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));
        let file_name = url.trim_start_matches("/uploads/");
        let written = std::fs::read(dir.path().join(file_name)).unwrap();
        assert_eq!(written, [1, 2, 3]);
    }
}
