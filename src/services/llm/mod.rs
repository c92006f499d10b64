// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use async_trait::async_trait;

pub mod gemini;

use crate::domain::AnalysisRequest;
use crate::error::Result;

/// The single I/O boundary of the analysis pipeline.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Issue exactly one call and return the model's raw text.
    ///
    /// Fails with `Configuration` before any network attempt when no
    /// credential is available, and with `EmptyResponse` when the backend
    /// answers without text.
    async fn send(&self, request: &AnalysisRequest) -> Result<String>;

    fn name(&self) -> &str;
}
