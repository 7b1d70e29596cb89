// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image file metadata lookup

use image::ImageReader;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::error::OcrError;

/// File size and pixel dimensions of an image on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    /// Size in bytes as reported by the filesystem
    pub size: u64,
    pub origin_width: u32,
    pub origin_height: u32,
}

/// Read the byte size and pixel dimensions of an image file
///
/// Only the image header is decoded.
///
/// # Errors
/// * `OcrError::NotFound` - the path does not exist
/// * `OcrError::InvalidImage` - the file is unreadable or not a supported image
pub fn read_image_metadata<P: AsRef<Path>>(path: P) -> Result<ImageMetadata, OcrError> {
    let path = path.as_ref();

    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(OcrError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(OcrError::InvalidImage(format!("{}: {}", path.display(), e))),
    };

    let invalid =
        |e: &dyn std::fmt::Display| OcrError::InvalidImage(format!("{}: {}", path.display(), e));

    // Format comes from the file's magic bytes, not its extension
    let (origin_width, origin_height) = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| invalid(&e))?
        .into_dimensions()
        .map_err(|e| invalid(&e))?;

    Ok(ImageMetadata {
        size,
        origin_width,
        origin_height,
    })
}
