// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde_json::Value;

use super::MediaType;

/// One ordered piece of request content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    /// Raw attachment bytes; transport encoding is the client's concern.
    InlineData { media_type: MediaType, bytes: Vec<u8> },
}

/// Everything the backend needs for a single analysis call.
///
/// The first part is always the instruction text; attachment parts follow in
/// upload order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    system_instruction: &'static str,
    parts: Vec<Part>,
    response_schema: Value,
}

impl AnalysisRequest {
    pub(crate) fn new(
        system_instruction: &'static str,
        instruction_text: String,
        attachments: Vec<(MediaType, Vec<u8>)>,
        response_schema: Value,
    ) -> Self {
        let mut parts = Vec::with_capacity(attachments.len() + 1);
        parts.push(Part::Text(instruction_text));
        parts.extend(
            attachments
                .into_iter()
                .map(|(media_type, bytes)| Part::InlineData { media_type, bytes }),
        );

        Self {
            system_instruction,
            parts,
            response_schema,
        }
    }

    pub fn system_instruction(&self) -> &str {
        self.system_instruction
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The composed instruction text (first part).
    pub fn instruction_text(&self) -> &str {
        match self.parts.first() {
            Some(Part::Text(text)) => text,
            _ => "",
        }
    }

    pub fn attachment_count(&self) -> usize {
        self.parts.len().saturating_sub(1)
    }

    pub fn response_schema(&self) -> &Value {
        &self.response_schema
    }
}
