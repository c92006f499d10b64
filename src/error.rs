// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use crate::services::analysis::AnalysisFailure;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(hakim::config::error),
        help("Set HAKIM_API_KEY or GEMINI_API_KEY, or run: hakim set-key")
    )]
    Configuration(String),

    #[error("Unsupported media type '{media_type}'")]
    #[diagnostic(
        code(hakim::attachment::unsupported),
        help("Only images (image/*) and PDF documents are accepted")
    )]
    UnsupportedMediaType { media_type: String },

    #[error("Attachment is {size} bytes, limit is {limit}")]
    #[diagnostic(
        code(hakim::attachment::too_large),
        help("Raise max_attachment_bytes or attach a smaller file")
    )]
    AttachmentTooLarge { size: usize, limit: usize },

    #[error("Malformed attachment: {0}")]
    #[diagnostic(code(hakim::attachment::malformed))]
    MalformedAttachment(String),

    #[error("No dispute text or attachment provided")]
    #[diagnostic(
        code(hakim::input::missing),
        help("Pass the dispute text as an argument, pipe it on stdin, or attach a file with --file")
    )]
    MissingInput,

    #[error("Transport error: {0}")]
    #[diagnostic(code(hakim::backend::transport))]
    Transport(String),

    #[error("Backend error (HTTP {status}): {message}")]
    #[diagnostic(code(hakim::backend::service))]
    Service { status: u16, message: String },

    #[error("Response candidate was blocked due to {reason}")]
    #[diagnostic(
        code(hakim::backend::blocked),
        help("The backend's safety filters refused the request; rephrase the dispute or remove the flagged evidence")
    )]
    Blocked { reason: String },

    #[error("Backend returned no usable text")]
    #[diagnostic(code(hakim::backend::empty))]
    EmptyResponse,

    #[error("Failed to parse backend response: {message}")]
    #[diagnostic(code(hakim::response::parse))]
    Parse { message: String, raw: String },

    /// A classified pipeline failure; displays the user-facing message.
    #[error("{0}")]
    #[diagnostic(code(hakim::analysis::failed))]
    Analysis(Box<AnalysisFailure>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(hakim::keyring::error),
        help("Check your system keychain configuration")
    )]
    Keyring(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

impl From<AnalysisFailure> for Error {
    fn from(failure: AnalysisFailure) -> Self {
        Error::Analysis(Box::new(failure))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Transport("request timed out".into())
        } else {
            Error::Transport(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
