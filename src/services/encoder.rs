// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{Attachment, MediaType};
use crate::error::{Error, Result};

/// Default per-file limit (20 MiB, the inline-data ceiling of the backend)
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 20 * 1024 * 1024;

/// A file that could not be turned into an attachment.
#[derive(Debug)]
pub struct Rejected {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of encoding several files: rejections never abort the batch.
#[derive(Debug, Default)]
pub struct EncodedBatch {
    pub attachments: Vec<Attachment>,
    pub rejected: Vec<Rejected>,
}

/// Encode in-memory bytes with a declared media type.
pub fn encode(bytes: &[u8], media_type: &str) -> Result<Attachment> {
    let media_type = MediaType::parse(media_type)?;
    Attachment::from_bytes(bytes, media_type)
}

/// Detect from the extension first, then from magic bytes.
///
/// An extension that maps to a type we cannot send (`.bin`, `.dat`, ...)
/// does not stop the signature check.
pub fn detect_media_type(path: &Path, bytes: &[u8]) -> Option<String> {
    let guessed = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string());

    match guessed {
        Some(media_type) if MediaType::parse(&media_type).is_ok() => Some(media_type),
        other => sniff_media_type(bytes).map(str::to_string).or(other),
    }
}

/// Recognise the evidence formats we accept by their signatures.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"%PDF-") {
        Some("application/pdf")
    } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP") {
        Some("image/webp")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else {
        None
    }
}

/// Read a file from disk and encode it.
pub async fn encode_file(path: &Path, max_bytes: usize) -> Result<Attachment> {
    let size = tokio::fs::metadata(path).await?.len();
    let size = usize::try_from(size).unwrap_or(usize::MAX);
    if size > max_bytes {
        return Err(Error::AttachmentTooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    let Some(media_type) = detect_media_type(path, &bytes) else {
        return Err(Error::UnsupportedMediaType {
            media_type: "application/octet-stream".into(),
        });
    };

    let attachment = encode(&bytes, &media_type)?;
    debug!(
        path = %path.display(),
        media_type = %attachment.media_type(),
        bytes = bytes.len(),
        "attachment encoded"
    );
    Ok(attachment)
}

/// Encode files in order, dropping the ones that fail.
pub async fn encode_files(paths: &[PathBuf], max_bytes: usize) -> EncodedBatch {
    let mut batch = EncodedBatch::default();

    for path in paths {
        match encode_file(path, max_bytes).await {
            Ok(attachment) => batch.attachments.push(attachment),
            Err(error) => {
                warn!(path = %path.display(), %error, "attachment dropped");
                batch.rejected.push(Rejected {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    batch
}
