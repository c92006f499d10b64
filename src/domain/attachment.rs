// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{Error, Result};

/// Media types accepted as evidence: any image, or PDF.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Full essence, e.g. `image/png`
    Image(String),
    Pdf,
}

impl MediaType {
    /// Parse a MIME string, ignoring parameters and case.
    pub fn parse(raw: &str) -> Result<Self> {
        let essence = raw
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.split_once('/') {
            Some(("image", sub)) if !sub.is_empty() => Ok(Self::Image(essence)),
            Some(("application", "pdf")) => Ok(Self::Pdf),
            _ => Err(Error::UnsupportedMediaType {
                media_type: raw.trim().to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Image(essence) => essence,
            Self::Pdf => "application/pdf",
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, Self::Pdf)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of binary evidence carried as a `data:` URI.
///
/// Fields are private so every instance holds a non-empty, decodable payload
/// with a permitted media type.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    payload: String,
    media_type: MediaType,
}

impl Attachment {
    pub(crate) fn from_bytes(bytes: &[u8], media_type: MediaType) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::MalformedAttachment("attachment is empty".into()));
        }

        let payload = format!("data:{};base64,{}", media_type, BASE64.encode(bytes));
        Ok(Self {
            payload,
            media_type,
        })
    }

    /// Accept a `data:<type>;base64,<data>` string as produced by a browser
    /// file reader.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| Error::MalformedAttachment("missing 'data:' scheme".into()))?;

        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| Error::MalformedAttachment("missing ',' separator".into()))?;

        let Some(mime) = header.strip_suffix(";base64") else {
            return Err(Error::MalformedAttachment(
                "only base64 data URIs are supported".into(),
            ));
        };

        let media_type = MediaType::parse(mime)?;
        let bytes = BASE64
            .decode(data)
            .map_err(|e| Error::MalformedAttachment(e.to_string()))?;

        Self::from_bytes(&bytes, media_type)
    }

    /// The full `data:` URI.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// The base64 section after the comma.
    pub fn base64_data(&self) -> &str {
        self.payload
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or_default()
    }

    /// Decode the payload back to the original bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.base64_data())
            .map_err(|e| Error::MalformedAttachment(e.to_string()))
    }
}

// Payloads can be megabytes of base64; keep Debug output readable.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("media_type", &self.media_type)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}
