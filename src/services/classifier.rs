// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt;

use crate::error::Error;

/// What went wrong, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    RateLimited,
    BillingDisabled,
    InvalidCredential,
    ContentBlocked,
    Configuration,
    MissingInput,
    EmptyResponse,
    UnreadableResponse,
    Unknown,
}

/// Substring signals, checked in order against the lowercased error text.
const SIGNALS: &[(&[&str], ErrorCategory)] = &[
    (&["quota", "429"], ErrorCategory::RateLimited),
    (&["billing"], ErrorCategory::BillingDisabled),
    (
        &["api key not valid", "permission denied", "permission_denied"],
        ErrorCategory::InvalidCredential,
    ),
    (&["candidate was blocked"], ErrorCategory::ContentBlocked),
];

impl ErrorCategory {
    /// The fixed message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::RateLimited => {
                "Kullanım sınırına ulaşıldı. Lütfen bir süre bekleyip tekrar deneyin."
            }
            Self::BillingDisabled => {
                "API anahtarının bağlı olduğu projede faturalandırma etkin değil. Lütfen faturalandırmayı etkinleştirin."
            }
            Self::InvalidCredential => {
                "API anahtarı geçersiz veya bu işlem için yetkisi yok. Lütfen anahtarı kontrol edin."
            }
            Self::ContentBlocked => {
                "İçerik güvenlik politikası nedeniyle yanıt üretilemedi. Lütfen uyuşmazlığı farklı bir dille yeniden ifade edin."
            }
            Self::Configuration => {
                "Sistem yapılandırması eksik: API anahtarı bulunamadı. Lütfen GEMINI_API_KEY değişkenini tanımlayın."
            }
            Self::MissingInput => {
                "Lütfen bir uyuşmazlık özeti yazın veya en az bir belge yükleyin."
            }
            Self::EmptyResponse => "Yapay zeka analiz üretemedi. Lütfen tekrar deneyin.",
            Self::UnreadableResponse => {
                "Yapay zekanın yanıtı okunamadı. Lütfen tekrar deneyin."
            }
            Self::Unknown => {
                "Analiz sırasında bir teknik hata oluştu. Lütfen bağlantınızı kontrol edip tekrar deneyin."
            }
        }
    }
}

/// A classified failure, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserMessage {
    pub category: ErrorCategory,
    pub text: &'static str,
}

impl From<ErrorCategory> for UserMessage {
    fn from(category: ErrorCategory) -> Self {
        Self {
            category,
            text: category.message(),
        }
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Map free-form failure text to a category. Total: falls back to `Unknown`.
pub fn classify_message(message: &str) -> ErrorCategory {
    let lower = message.to_lowercase();
    SIGNALS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, category)| *category)
        .unwrap_or(ErrorCategory::Unknown)
}

/// Classify a pipeline error. Locally raised errors have their own
/// categories; backend and transport errors go through the signal table.
pub fn classify(error: &Error) -> UserMessage {
    let category = match error {
        Error::Configuration(_) => ErrorCategory::Configuration,
        Error::MissingInput => ErrorCategory::MissingInput,
        Error::EmptyResponse => ErrorCategory::EmptyResponse,
        Error::Parse { .. } => ErrorCategory::UnreadableResponse,
        Error::Blocked { .. } => ErrorCategory::ContentBlocked,
        other => classify_message(&other.to_string()),
    };
    category.into()
}
