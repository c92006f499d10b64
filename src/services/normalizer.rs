// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{AnalysisResult, VerdictRecord};
use crate::error::{Error, Result};
use crate::services::request::{PROVISION_FIELDS, VERDICT_FIELDS};

/// A whole-response fence: ```json ... ``` or ``` ... ```
static CODE_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\r?\n?```$").unwrap());

/// The first fence anywhere in the text; the closing fence may be missing.
static EMBEDDED_FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)(?:```|\z)").unwrap()
});

/// The two shapes the backend is seen to return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVerdicts {
    Many(Vec<Value>),
    One(Map<String, Value>),
}

impl RawVerdicts {
    fn into_values(self) -> Vec<Value> {
        match self {
            Self::Many(values) => values,
            Self::One(object) => vec![Value::Object(object)],
        }
    }
}

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Parse raw backend text into a non-empty list of validated records.
    pub fn normalize(raw: &str) -> Result<AnalysisResult> {
        let cleaned = Self::strip_fences(raw);

        let parsed: RawVerdicts = serde_json::from_str(cleaned).map_err(|e| Error::Parse {
            message: format!("response is not a JSON array or object: {e}"),
            raw: raw.to_string(),
        })?;

        let wrapped = matches!(parsed, RawVerdicts::One(_));
        let values = parsed.into_values();

        let records = values
            .iter()
            .enumerate()
            .map(|(index, value)| Self::to_record(index, value, raw))
            .collect::<Result<Vec<_>>>()?;

        debug!(records = records.len(), wrapped, "response normalized");

        AnalysisResult::new(records).ok_or_else(|| Error::Parse {
            message: "response contains no verdict records".into(),
            raw: raw.to_string(),
        })
    }

    /// Remove markdown code fences, if any.
    ///
    /// A whole-response fence is unwrapped directly. Otherwise, unless the
    /// text already starts as JSON, the body of the first fence is taken,
    /// ignoring prose around it and a missing closing fence.
    pub fn strip_fences(raw: &str) -> &str {
        let trimmed = raw.trim();
        if let Some(inner) = CODE_FENCE_REGEX.captures(trimmed).and_then(|caps| caps.get(1)) {
            return inner.as_str().trim();
        }

        if trimmed.starts_with(['[', '{']) {
            return trimmed;
        }

        EMBEDDED_FENCE_REGEX
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|body| !body.is_empty())
            .unwrap_or(trimmed)
    }

    fn to_record(index: usize, value: &Value, raw: &str) -> Result<VerdictRecord> {
        let parse_error = |message: String| Error::Parse {
            message: format!("record {}: {message}", index + 1),
            raw: raw.to_string(),
        };

        let Some(object) = value.as_object() else {
            return Err(parse_error("expected an object".into()));
        };

        for field in VERDICT_FIELDS {
            match object.get(field) {
                None | Some(Value::Null) => {
                    return Err(parse_error(format!("missing field '{field}'")));
                }
                Some(Value::String(s)) if s.trim().is_empty() => {
                    return Err(parse_error(format!("field '{field}' is blank")));
                }
                _ => {}
            }
        }

        if let Some(Value::Array(provisions)) = object.get("relatedProvisions") {
            for (i, provision) in provisions.iter().enumerate() {
                for field in PROVISION_FIELDS {
                    let blank = provision
                        .get(field)
                        .and_then(Value::as_str)
                        .is_none_or(|s| s.trim().is_empty());
                    if blank {
                        return Err(parse_error(format!(
                            "provision {} has no '{field}'",
                            i + 1
                        )));
                    }
                }
            }
        }

        let record: VerdictRecord = serde_json::from_value(value.clone())
            .map_err(|e| parse_error(e.to_string()))?;

        if record.related_provisions.is_empty() {
            warn!(record = index + 1, "verdict cites no provisions");
        }

        Ok(record)
    }
}
