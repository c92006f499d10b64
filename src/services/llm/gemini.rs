// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::AnalysisBackend;
use crate::config::Config;
use crate::domain::{AnalysisRequest, Part};
use crate::error::{Error, Result};

/// Finish reasons that mean the safety filter withheld the answer.
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
    "IMAGE_SAFETY",
];

pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    temperature: Option<f32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

impl GeminiBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Configuration(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config
                .api_key
                .as_ref()
                .map(|k| SecretString::from(k.expose_secret().to_owned())),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn body<'a>(&self, request: &'a AnalysisRequest) -> GenerateContentRequest<'a> {
        let parts = request
            .parts()
            .iter()
            .map(|part| match part {
                Part::Text(text) => WirePart::Text { text },
                Part::InlineData { media_type, bytes } => WirePart::Inline {
                    inline_data: InlineData {
                        mime_type: media_type.as_str(),
                        data: BASE64.encode(bytes),
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![WirePart::Text {
                    text: request.system_instruction(),
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: request.response_schema(),
                temperature: self.temperature,
            },
        }
    }

    /// The request body as JSON with attachment data replaced by a size note.
    pub fn preview(&self, request: &AnalysisRequest) -> Value {
        let mut body = serde_json::to_value(self.body(request)).unwrap_or(Value::Null);

        if let Some(parts) = body
            .pointer_mut("/contents/0/parts")
            .and_then(Value::as_array_mut)
        {
            for part in parts {
                if let Some(data) = part.pointer_mut("/inlineData/data") {
                    let len = data.as_str().map(str::len).unwrap_or_default();
                    *data = Value::String(format!("<{len} base64 chars elided>"));
                }
            }
        }

        body
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        let block_reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Err(match block_reason {
                Some(reason) => blocked(&reason),
                None => Error::EmptyResponse,
            });
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason {
            Some(reason) if BLOCKED_FINISH_REASONS.contains(&reason.as_str()) => {
                Err(blocked(&reason))
            }
            _ => Err(Error::EmptyResponse),
        }
    }
}

fn blocked(reason: &str) -> Error {
    Error::Blocked {
        reason: reason.to_string(),
    }
}

#[async_trait]
impl AnalysisBackend for GeminiBackend {
    async fn send(&self, request: &AnalysisRequest) -> Result<String> {
        let Some(api_key) = self.api_key.as_ref() else {
            return Err(Error::Configuration(
                "no API key configured for the analysis backend".into(),
            ));
        };

        debug!(
            model = %self.model,
            parts = request.parts().len(),
            "sending analysis request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&self.body(request))
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "backend responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => match envelope.error.status {
                    Some(code) => format!("{} ({code})", envelope.error.message),
                    None => envelope.error.message,
                },
                Err(_) => body,
            };
            warn!(status = status.as_u16(), "backend rejected the request");
            return Err(Error::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| Error::Parse {
                message: format!("unexpected response envelope: {e}"),
                raw: body.clone(),
            })?;

        Self::extract_text(parsed)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
