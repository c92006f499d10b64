// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{AnalysisRequest, AnalysisResult, Attachment};
use crate::error::{Error, Result};
use crate::services::classifier::{self, UserMessage};
use crate::services::llm::AnalysisBackend;
use crate::services::normalizer::ResponseNormalizer;
use crate::services::request::RequestBuilder;

/// A failed analysis: the message to show, plus the cause for logs.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct AnalysisFailure {
    pub message: UserMessage,
    #[source]
    pub source: Error,
}

impl From<Error> for AnalysisFailure {
    fn from(source: Error) -> Self {
        Self {
            message: classifier::classify(&source),
            source,
        }
    }
}

/// Reject a submission that has neither text nor attachments.
pub fn ensure_input(dispute_text: &str, attachments: &[Attachment]) -> Result<()> {
    if dispute_text.trim().is_empty() && attachments.is_empty() {
        return Err(Error::MissingInput);
    }
    Ok(())
}

/// The analysis pipeline: build, send once, normalize, classify failures.
///
/// Holds no per-call state; callers keep at most one call in flight.
pub struct DisputeAnalyzer {
    backend: Box<dyn AnalysisBackend>,
}

impl DisputeAnalyzer {
    pub fn new(backend: Box<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Analyze a dispute. Resolves with at least one verdict record or with a
    /// classified, user-facing failure.
    pub async fn analyze(
        &self,
        dispute_text: &str,
        attachments: &[Attachment],
    ) -> std::result::Result<AnalysisResult, AnalysisFailure> {
        let request = RequestBuilder::build(dispute_text, attachments).map_err(Self::fail)?;
        self.analyze_request(&request).await
    }

    /// Same as [`analyze`](Self::analyze) for a request the caller already
    /// built, e.g. to show it before sending.
    pub async fn analyze_request(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<AnalysisResult, AnalysisFailure> {
        let result = self.run(request).await.map_err(Self::fail)?;
        info!(records = result.len(), "analysis complete");
        Ok(result)
    }

    fn fail(error: Error) -> AnalysisFailure {
        let failure = AnalysisFailure::from(error);
        warn!(
            category = ?failure.message.category,
            error = %failure.source,
            "analysis failed"
        );
        failure
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let raw = self.backend.send(request).await?;
        debug!(
            backend = self.backend.name(),
            raw_len = raw.len(),
            "normalizing backend response"
        );

        if raw.trim().is_empty() {
            return Err(Error::EmptyResponse);
        }

        ResponseNormalizer::normalize(&raw).inspect_err(|e| {
            if let Error::Parse { raw, .. } = e {
                debug!(raw = %raw, "unparseable backend response");
            }
        })
    }
}
