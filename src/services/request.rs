// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{AnalysisRequest, Attachment};
use crate::error::{Error, Result};

pub const SYSTEM_INSTRUCTION: &str = r#"Sen son derece profesyonel, tarafsız ve uzman bir 'Dijital Hakim'sin.
Görevin, kullanıcı tarafından sunulan metni ve BELGELERİ (Resim/PDF) satır satır inceleyerek içerisindeki TÜM farklı hukuki uyuşmazlıkları, soruları, talepleri veya maddeleri tek tek tespit etmektir.

Analiz kuralları:
1. Belgede birden fazla soru veya konu varsa, her birini AYRI birer analiz nesnesi olarak oluştur.
2. Hiçbir soruyu atlama, birden fazla konuyu tek bir nesnede birleştirme.
3. Cevapların HER ZAMAN geçerli bir JSON ARRAY (liste) formatında olmalıdır.
4. Her nesnede caseSummary, legalClassification, relatedProvisions, reasoning, plainExplanation ve ruling alanlarının tamamını doldur."#;

const PROMPT_PREFIX: &str =
    "Aşağıdaki uyuşmazlığı ve ekteki belgeleri Türk hukuk mevzuatı çerçevesinde analiz et: ";

/// Used when only documents were submitted.
pub const DOCUMENT_ONLY_FALLBACK: &str = "Belge analizi isteniyor.";

/// Field names every verdict object must carry, in schema order.
pub const VERDICT_FIELDS: [&str; 6] = [
    "caseSummary",
    "legalClassification",
    "relatedProvisions",
    "reasoning",
    "plainExplanation",
    "ruling",
];

pub const PROVISION_FIELDS: [&str; 3] = ["law", "article", "text"];

/// Output schema in the backend's OpenAPI subset: an array of six-field
/// objects, every field required.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "caseSummary": { "type": "STRING" },
                "legalClassification": { "type": "STRING" },
                "relatedProvisions": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "law": { "type": "STRING" },
                            "article": { "type": "STRING" },
                            "text": { "type": "STRING" }
                        },
                        "required": PROVISION_FIELDS
                    }
                },
                "reasoning": { "type": "STRING" },
                "plainExplanation": { "type": "STRING" },
                "ruling": { "type": "STRING" }
            },
            "required": VERDICT_FIELDS
        }
    })
}

pub struct RequestBuilder;

impl RequestBuilder {
    /// Embed the dispute text verbatim in the instruction prompt.
    pub fn compose_instruction(dispute_text: &str) -> String {
        let body = if dispute_text.trim().is_empty() {
            DOCUMENT_ONLY_FALLBACK
        } else {
            dispute_text
        };
        format!("{PROMPT_PREFIX}{body}")
    }

    /// Build the request: instruction text first, then one part per
    /// attachment in the order given.
    ///
    /// Callers are expected to reject empty input before getting here; the
    /// check is repeated so an empty request can never reach the backend.
    pub fn build(dispute_text: &str, attachments: &[Attachment]) -> Result<AnalysisRequest> {
        if dispute_text.trim().is_empty() && attachments.is_empty() {
            return Err(Error::MissingInput);
        }

        let decoded = attachments
            .iter()
            .map(|a| Ok((a.media_type().clone(), a.decode()?)))
            .collect::<Result<Vec<_>>>()?;

        let request = AnalysisRequest::new(
            SYSTEM_INSTRUCTION,
            Self::compose_instruction(dispute_text),
            decoded,
            response_schema(),
        );

        debug!(
            text_chars = dispute_text.chars().count(),
            attachments = request.attachment_count(),
            "analysis request built"
        );
        Ok(request)
    }
}
